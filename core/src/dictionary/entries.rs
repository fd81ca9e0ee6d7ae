//! Standard attribute dictionary entries,
//! generated from DICOM PS3.6 and trimmed to the data element registry
//! (retired and private ranges excluded).
//!
//! Automatically generated. Edit at your own risk.

use super::DictionaryEntryRef as E;
use crate::header::Tag;
use crate::header::VR::*;

/// The standard attribute dictionary table.
#[rustfmt::skip]
pub static ENTRIES: &[E<'static>] = &[
    // group 0002: file meta information
    E { tag: Tag(0x0002, 0x0000), alias: "FileMetaInformationGroupLength", vr: UL, vm: "1" },
    E { tag: Tag(0x0002, 0x0001), alias: "FileMetaInformationVersion", vr: OB, vm: "1" },
    E { tag: Tag(0x0002, 0x0002), alias: "MediaStorageSOPClassUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0002, 0x0003), alias: "MediaStorageSOPInstanceUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0002, 0x0010), alias: "TransferSyntaxUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0002, 0x0012), alias: "ImplementationClassUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0002, 0x0013), alias: "ImplementationVersionName", vr: SH, vm: "1" },
    E { tag: Tag(0x0002, 0x0016), alias: "SourceApplicationEntityTitle", vr: AE, vm: "1" },
    E { tag: Tag(0x0002, 0x0017), alias: "SendingApplicationEntityTitle", vr: AE, vm: "1" },
    E { tag: Tag(0x0002, 0x0018), alias: "ReceivingApplicationEntityTitle", vr: AE, vm: "1" },
    E { tag: Tag(0x0002, 0x0100), alias: "PrivateInformationCreatorUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0002, 0x0102), alias: "PrivateInformation", vr: OB, vm: "1" },
    // group 0008: general identification
    E { tag: Tag(0x0008, 0x0005), alias: "SpecificCharacterSet", vr: CS, vm: "1-n" },
    E { tag: Tag(0x0008, 0x0008), alias: "ImageType", vr: CS, vm: "2-n" },
    E { tag: Tag(0x0008, 0x0012), alias: "InstanceCreationDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0008, 0x0013), alias: "InstanceCreationTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0008, 0x0014), alias: "InstanceCreatorUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0008, 0x0016), alias: "SOPClassUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0008, 0x0018), alias: "SOPInstanceUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0008, 0x0020), alias: "StudyDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0008, 0x0021), alias: "SeriesDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0008, 0x0022), alias: "AcquisitionDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0008, 0x0023), alias: "ContentDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0008, 0x002A), alias: "AcquisitionDateTime", vr: DT, vm: "1" },
    E { tag: Tag(0x0008, 0x0030), alias: "StudyTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0008, 0x0031), alias: "SeriesTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0008, 0x0032), alias: "AcquisitionTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0008, 0x0033), alias: "ContentTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0008, 0x0050), alias: "AccessionNumber", vr: SH, vm: "1" },
    E { tag: Tag(0x0008, 0x0060), alias: "Modality", vr: CS, vm: "1" },
    E { tag: Tag(0x0008, 0x0061), alias: "ModalitiesInStudy", vr: CS, vm: "1-n" },
    E { tag: Tag(0x0008, 0x0064), alias: "ConversionType", vr: CS, vm: "1" },
    E { tag: Tag(0x0008, 0x0068), alias: "PresentationIntentType", vr: CS, vm: "1" },
    E { tag: Tag(0x0008, 0x0070), alias: "Manufacturer", vr: LO, vm: "1" },
    E { tag: Tag(0x0008, 0x0080), alias: "InstitutionName", vr: LO, vm: "1" },
    E { tag: Tag(0x0008, 0x0081), alias: "InstitutionAddress", vr: ST, vm: "1" },
    E { tag: Tag(0x0008, 0x0082), alias: "InstitutionCodeSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x0090), alias: "ReferringPhysicianName", vr: PN, vm: "1" },
    E { tag: Tag(0x0008, 0x0092), alias: "ReferringPhysicianAddress", vr: ST, vm: "1" },
    E { tag: Tag(0x0008, 0x0094), alias: "ReferringPhysicianTelephoneNumbers", vr: SH, vm: "1-n" },
    E { tag: Tag(0x0008, 0x0096), alias: "ReferringPhysicianIdentificationSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x0100), alias: "CodeValue", vr: SH, vm: "1" },
    E { tag: Tag(0x0008, 0x0102), alias: "CodingSchemeDesignator", vr: SH, vm: "1" },
    E { tag: Tag(0x0008, 0x0103), alias: "CodingSchemeVersion", vr: SH, vm: "1" },
    E { tag: Tag(0x0008, 0x0104), alias: "CodeMeaning", vr: LO, vm: "1" },
    E { tag: Tag(0x0008, 0x0201), alias: "TimezoneOffsetFromUTC", vr: SH, vm: "1" },
    E { tag: Tag(0x0008, 0x1010), alias: "StationName", vr: SH, vm: "1" },
    E { tag: Tag(0x0008, 0x1030), alias: "StudyDescription", vr: LO, vm: "1" },
    E { tag: Tag(0x0008, 0x1032), alias: "ProcedureCodeSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x103E), alias: "SeriesDescription", vr: LO, vm: "1" },
    E { tag: Tag(0x0008, 0x103F), alias: "SeriesDescriptionCodeSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x1040), alias: "InstitutionalDepartmentName", vr: LO, vm: "1" },
    E { tag: Tag(0x0008, 0x1048), alias: "PhysiciansOfRecord", vr: PN, vm: "1-n" },
    E { tag: Tag(0x0008, 0x1050), alias: "PerformingPhysicianName", vr: PN, vm: "1-n" },
    E { tag: Tag(0x0008, 0x1060), alias: "NameOfPhysiciansReadingStudy", vr: PN, vm: "1-n" },
    E { tag: Tag(0x0008, 0x1070), alias: "OperatorsName", vr: PN, vm: "1-n" },
    E { tag: Tag(0x0008, 0x1080), alias: "AdmittingDiagnosesDescription", vr: LO, vm: "1-n" },
    E { tag: Tag(0x0008, 0x1090), alias: "ManufacturerModelName", vr: LO, vm: "1" },
    E { tag: Tag(0x0008, 0x1110), alias: "ReferencedStudySequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x1111), alias: "ReferencedPerformedProcedureStepSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x1115), alias: "ReferencedSeriesSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x1120), alias: "ReferencedPatientSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x1140), alias: "ReferencedImageSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x1150), alias: "ReferencedSOPClassUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0008, 0x1155), alias: "ReferencedSOPInstanceUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0008, 0x1160), alias: "ReferencedFrameNumber", vr: IS, vm: "1-n" },
    E { tag: Tag(0x0008, 0x2111), alias: "DerivationDescription", vr: ST, vm: "1" },
    E { tag: Tag(0x0008, 0x2112), alias: "SourceImageSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x2218), alias: "AnatomicRegionSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0008, 0x9215), alias: "DerivationCodeSequence", vr: SQ, vm: "1" },
    // group 0010: patient
    E { tag: Tag(0x0010, 0x0010), alias: "PatientName", vr: PN, vm: "1" },
    E { tag: Tag(0x0010, 0x0020), alias: "PatientID", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x0021), alias: "IssuerOfPatientID", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x0022), alias: "TypeOfPatientID", vr: CS, vm: "1" },
    E { tag: Tag(0x0010, 0x0030), alias: "PatientBirthDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0010, 0x0032), alias: "PatientBirthTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0010, 0x0040), alias: "PatientSex", vr: CS, vm: "1" },
    E { tag: Tag(0x0010, 0x1000), alias: "OtherPatientIDs", vr: LO, vm: "1-n" },
    E { tag: Tag(0x0010, 0x1001), alias: "OtherPatientNames", vr: PN, vm: "1-n" },
    E { tag: Tag(0x0010, 0x1005), alias: "PatientBirthName", vr: PN, vm: "1" },
    E { tag: Tag(0x0010, 0x1010), alias: "PatientAge", vr: AS, vm: "1" },
    E { tag: Tag(0x0010, 0x1020), alias: "PatientSize", vr: DS, vm: "1" },
    E { tag: Tag(0x0010, 0x1030), alias: "PatientWeight", vr: DS, vm: "1" },
    E { tag: Tag(0x0010, 0x1040), alias: "PatientAddress", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x1060), alias: "PatientMotherBirthName", vr: PN, vm: "1" },
    E { tag: Tag(0x0010, 0x1080), alias: "MilitaryRank", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x1081), alias: "BranchOfService", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x1090), alias: "MedicalRecordLocator", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x2000), alias: "MedicalAlerts", vr: LO, vm: "1-n" },
    E { tag: Tag(0x0010, 0x2110), alias: "Allergies", vr: LO, vm: "1-n" },
    E { tag: Tag(0x0010, 0x2150), alias: "CountryOfResidence", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x2152), alias: "RegionOfResidence", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x2154), alias: "PatientTelephoneNumbers", vr: SH, vm: "1-n" },
    E { tag: Tag(0x0010, 0x2160), alias: "EthnicGroup", vr: SH, vm: "1" },
    E { tag: Tag(0x0010, 0x2180), alias: "Occupation", vr: SH, vm: "1" },
    E { tag: Tag(0x0010, 0x21A0), alias: "SmokingStatus", vr: CS, vm: "1" },
    E { tag: Tag(0x0010, 0x21B0), alias: "AdditionalPatientHistory", vr: LT, vm: "1" },
    E { tag: Tag(0x0010, 0x21C0), alias: "PregnancyStatus", vr: US, vm: "1" },
    E { tag: Tag(0x0010, 0x21D0), alias: "LastMenstrualDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0010, 0x21F0), alias: "PatientReligiousPreference", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x2201), alias: "PatientSpeciesDescription", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x2292), alias: "PatientBreedDescription", vr: LO, vm: "1" },
    E { tag: Tag(0x0010, 0x4000), alias: "PatientComments", vr: LT, vm: "1" },
    // group 0012: clinical trial
    E { tag: Tag(0x0012, 0x0010), alias: "ClinicalTrialSponsorName", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0020), alias: "ClinicalTrialProtocolID", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0021), alias: "ClinicalTrialProtocolName", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0030), alias: "ClinicalTrialSiteID", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0031), alias: "ClinicalTrialSiteName", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0040), alias: "ClinicalTrialSubjectID", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0042), alias: "ClinicalTrialSubjectReadingID", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0050), alias: "ClinicalTrialTimePointID", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0051), alias: "ClinicalTrialTimePointDescription", vr: ST, vm: "1" },
    E { tag: Tag(0x0012, 0x0060), alias: "ClinicalTrialCoordinatingCenterName", vr: LO, vm: "1" },
    E { tag: Tag(0x0012, 0x0062), alias: "PatientIdentityRemoved", vr: CS, vm: "1" },
    E { tag: Tag(0x0012, 0x0063), alias: "DeidentificationMethod", vr: LO, vm: "1-n" },
    // group 0018: acquisition
    E { tag: Tag(0x0018, 0x0010), alias: "ContrastBolusAgent", vr: LO, vm: "1" },
    E { tag: Tag(0x0018, 0x0015), alias: "BodyPartExamined", vr: CS, vm: "1" },
    E { tag: Tag(0x0018, 0x0020), alias: "ScanningSequence", vr: CS, vm: "1-n" },
    E { tag: Tag(0x0018, 0x0021), alias: "SequenceVariant", vr: CS, vm: "1-n" },
    E { tag: Tag(0x0018, 0x0022), alias: "ScanOptions", vr: CS, vm: "1-n" },
    E { tag: Tag(0x0018, 0x0023), alias: "MRAcquisitionType", vr: CS, vm: "1" },
    E { tag: Tag(0x0018, 0x0024), alias: "SequenceName", vr: SH, vm: "1" },
    E { tag: Tag(0x0018, 0x0025), alias: "AngioFlag", vr: CS, vm: "1" },
    E { tag: Tag(0x0018, 0x0050), alias: "SliceThickness", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0060), alias: "KVP", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0070), alias: "CountsAccumulated", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x0071), alias: "AcquisitionTerminationCondition", vr: CS, vm: "1" },
    E { tag: Tag(0x0018, 0x0080), alias: "RepetitionTime", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0081), alias: "EchoTime", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0082), alias: "InversionTime", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0083), alias: "NumberOfAverages", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0084), alias: "ImagingFrequency", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0085), alias: "ImagedNucleus", vr: SH, vm: "1" },
    E { tag: Tag(0x0018, 0x0086), alias: "EchoNumbers", vr: IS, vm: "1-n" },
    E { tag: Tag(0x0018, 0x0087), alias: "MagneticFieldStrength", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0088), alias: "SpacingBetweenSlices", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0089), alias: "NumberOfPhaseEncodingSteps", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x0090), alias: "DataCollectionDiameter", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0091), alias: "EchoTrainLength", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x0093), alias: "PercentSampling", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0094), alias: "PercentPhaseFieldOfView", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x0095), alias: "PixelBandwidth", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1000), alias: "DeviceSerialNumber", vr: LO, vm: "1" },
    E { tag: Tag(0x0018, 0x1020), alias: "SoftwareVersions", vr: LO, vm: "1-n" },
    E { tag: Tag(0x0018, 0x1030), alias: "ProtocolName", vr: LO, vm: "1" },
    E { tag: Tag(0x0018, 0x1040), alias: "ContrastBolusRoute", vr: LO, vm: "1" },
    E { tag: Tag(0x0018, 0x1041), alias: "ContrastBolusVolume", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1050), alias: "SpatialResolution", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1060), alias: "TriggerTime", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1062), alias: "NominalInterval", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x1063), alias: "FrameTime", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1064), alias: "CardiacFramingType", vr: LO, vm: "1" },
    E { tag: Tag(0x0018, 0x1088), alias: "HeartRate", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x1090), alias: "CardiacNumberOfImages", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x1100), alias: "ReconstructionDiameter", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1110), alias: "DistanceSourceToDetector", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1111), alias: "DistanceSourceToPatient", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1114), alias: "EstimatedRadiographicMagnificationFactor", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1120), alias: "GantryDetectorTilt", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1130), alias: "TableHeight", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1140), alias: "RotationDirection", vr: CS, vm: "1" },
    E { tag: Tag(0x0018, 0x1150), alias: "ExposureTime", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x1151), alias: "XRayTubeCurrent", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x1152), alias: "Exposure", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x1153), alias: "ExposureInuAs", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x1160), alias: "FilterType", vr: SH, vm: "1" },
    E { tag: Tag(0x0018, 0x1164), alias: "ImagerPixelSpacing", vr: DS, vm: "2" },
    E { tag: Tag(0x0018, 0x1170), alias: "GeneratorPower", vr: IS, vm: "1" },
    E { tag: Tag(0x0018, 0x1190), alias: "FocalSpots", vr: DS, vm: "1-n" },
    E { tag: Tag(0x0018, 0x1200), alias: "DateOfLastCalibration", vr: DA, vm: "1-n" },
    E { tag: Tag(0x0018, 0x1201), alias: "TimeOfLastCalibration", vr: TM, vm: "1-n" },
    E { tag: Tag(0x0018, 0x1210), alias: "ConvolutionKernel", vr: SH, vm: "1-n" },
    E { tag: Tag(0x0018, 0x1250), alias: "ReceiveCoilName", vr: SH, vm: "1" },
    E { tag: Tag(0x0018, 0x1251), alias: "TransmitCoilName", vr: SH, vm: "1" },
    E { tag: Tag(0x0018, 0x1310), alias: "AcquisitionMatrix", vr: US, vm: "4" },
    E { tag: Tag(0x0018, 0x1312), alias: "InPlanePhaseEncodingDirection", vr: CS, vm: "1" },
    E { tag: Tag(0x0018, 0x1314), alias: "FlipAngle", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1315), alias: "VariableFlipAngleFlag", vr: CS, vm: "1" },
    E { tag: Tag(0x0018, 0x1316), alias: "SAR", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x1318), alias: "dBdt", vr: DS, vm: "1" },
    E { tag: Tag(0x0018, 0x5100), alias: "PatientPosition", vr: CS, vm: "1" },
    E { tag: Tag(0x0018, 0x5101), alias: "ViewPosition", vr: CS, vm: "1" },
    // group 0020: image relationship & geometry
    E { tag: Tag(0x0020, 0x000D), alias: "StudyInstanceUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0020, 0x000E), alias: "SeriesInstanceUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0020, 0x0010), alias: "StudyID", vr: SH, vm: "1" },
    E { tag: Tag(0x0020, 0x0011), alias: "SeriesNumber", vr: IS, vm: "1" },
    E { tag: Tag(0x0020, 0x0012), alias: "AcquisitionNumber", vr: IS, vm: "1" },
    E { tag: Tag(0x0020, 0x0013), alias: "InstanceNumber", vr: IS, vm: "1" },
    E { tag: Tag(0x0020, 0x0020), alias: "PatientOrientation", vr: CS, vm: "2" },
    E { tag: Tag(0x0020, 0x0032), alias: "ImagePositionPatient", vr: DS, vm: "3" },
    E { tag: Tag(0x0020, 0x0037), alias: "ImageOrientationPatient", vr: DS, vm: "6" },
    E { tag: Tag(0x0020, 0x0052), alias: "FrameOfReferenceUID", vr: UI, vm: "1" },
    E { tag: Tag(0x0020, 0x0060), alias: "Laterality", vr: CS, vm: "1" },
    E { tag: Tag(0x0020, 0x0100), alias: "TemporalPositionIdentifier", vr: IS, vm: "1" },
    E { tag: Tag(0x0020, 0x0105), alias: "NumberOfTemporalPositions", vr: IS, vm: "1" },
    E { tag: Tag(0x0020, 0x0110), alias: "TemporalResolution", vr: DS, vm: "1" },
    E { tag: Tag(0x0020, 0x1002), alias: "ImagesInAcquisition", vr: IS, vm: "1" },
    E { tag: Tag(0x0020, 0x1040), alias: "PositionReferenceIndicator", vr: LO, vm: "1" },
    E { tag: Tag(0x0020, 0x1041), alias: "SliceLocation", vr: DS, vm: "1" },
    E { tag: Tag(0x0020, 0x4000), alias: "ImageComments", vr: LT, vm: "1" },
    E { tag: Tag(0x0020, 0x9113), alias: "PlanePositionSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0020, 0x9116), alias: "PlaneOrientationSequence", vr: SQ, vm: "1" },
    // group 0028: image presentation
    E { tag: Tag(0x0028, 0x0002), alias: "SamplesPerPixel", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0004), alias: "PhotometricInterpretation", vr: CS, vm: "1" },
    E { tag: Tag(0x0028, 0x0006), alias: "PlanarConfiguration", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0008), alias: "NumberOfFrames", vr: IS, vm: "1" },
    E { tag: Tag(0x0028, 0x0009), alias: "FrameIncrementPointer", vr: AT, vm: "1-n" },
    E { tag: Tag(0x0028, 0x0010), alias: "Rows", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0011), alias: "Columns", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0030), alias: "PixelSpacing", vr: DS, vm: "2" },
    E { tag: Tag(0x0028, 0x0034), alias: "PixelAspectRatio", vr: IS, vm: "2" },
    E { tag: Tag(0x0028, 0x0051), alias: "CorrectedImage", vr: CS, vm: "1-n" },
    E { tag: Tag(0x0028, 0x0100), alias: "BitsAllocated", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0101), alias: "BitsStored", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0102), alias: "HighBit", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0103), alias: "PixelRepresentation", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0106), alias: "SmallestImagePixelValue", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0107), alias: "LargestImagePixelValue", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0120), alias: "PixelPaddingValue", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0121), alias: "PixelPaddingRangeLimit", vr: US, vm: "1" },
    E { tag: Tag(0x0028, 0x0301), alias: "BurnedInAnnotation", vr: CS, vm: "1" },
    E { tag: Tag(0x0028, 0x1050), alias: "WindowCenter", vr: DS, vm: "1-n" },
    E { tag: Tag(0x0028, 0x1051), alias: "WindowWidth", vr: DS, vm: "1-n" },
    E { tag: Tag(0x0028, 0x1052), alias: "RescaleIntercept", vr: DS, vm: "1" },
    E { tag: Tag(0x0028, 0x1053), alias: "RescaleSlope", vr: DS, vm: "1" },
    E { tag: Tag(0x0028, 0x1054), alias: "RescaleType", vr: LO, vm: "1" },
    E { tag: Tag(0x0028, 0x1055), alias: "WindowCenterWidthExplanation", vr: LO, vm: "1-n" },
    E { tag: Tag(0x0028, 0x1056), alias: "VOILUTFunction", vr: CS, vm: "1" },
    E { tag: Tag(0x0028, 0x1101), alias: "RedPaletteColorLookupTableDescriptor", vr: US, vm: "3" },
    E { tag: Tag(0x0028, 0x1102), alias: "GreenPaletteColorLookupTableDescriptor", vr: US, vm: "3" },
    E { tag: Tag(0x0028, 0x1103), alias: "BluePaletteColorLookupTableDescriptor", vr: US, vm: "3" },
    E { tag: Tag(0x0028, 0x1201), alias: "RedPaletteColorLookupTableData", vr: OW, vm: "1" },
    E { tag: Tag(0x0028, 0x1202), alias: "GreenPaletteColorLookupTableData", vr: OW, vm: "1" },
    E { tag: Tag(0x0028, 0x1203), alias: "BluePaletteColorLookupTableData", vr: OW, vm: "1" },
    E { tag: Tag(0x0028, 0x2110), alias: "LossyImageCompression", vr: CS, vm: "1" },
    E { tag: Tag(0x0028, 0x2112), alias: "LossyImageCompressionRatio", vr: DS, vm: "1-n" },
    E { tag: Tag(0x0028, 0x2114), alias: "LossyImageCompressionMethod", vr: CS, vm: "1-n" },
    E { tag: Tag(0x0028, 0x3000), alias: "ModalityLUTSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0028, 0x3010), alias: "VOILUTSequence", vr: SQ, vm: "1" },
    // group 0032: study
    E { tag: Tag(0x0032, 0x000A), alias: "StudyStatusID", vr: CS, vm: "1" },
    E { tag: Tag(0x0032, 0x000C), alias: "StudyPriorityID", vr: CS, vm: "1" },
    E { tag: Tag(0x0032, 0x0012), alias: "StudyIDIssuer", vr: LO, vm: "1" },
    E { tag: Tag(0x0032, 0x1030), alias: "ReasonForStudy", vr: LO, vm: "1" },
    E { tag: Tag(0x0032, 0x1032), alias: "RequestingPhysician", vr: PN, vm: "1" },
    E { tag: Tag(0x0032, 0x1033), alias: "RequestingService", vr: LO, vm: "1" },
    E { tag: Tag(0x0032, 0x1060), alias: "RequestedProcedureDescription", vr: LO, vm: "1" },
    E { tag: Tag(0x0032, 0x1064), alias: "RequestedProcedureCodeSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0032, 0x1070), alias: "RequestedContrastAgent", vr: LO, vm: "1" },
    E { tag: Tag(0x0032, 0x4000), alias: "StudyComments", vr: LT, vm: "1" },
    // group 0038: visit
    E { tag: Tag(0x0038, 0x0010), alias: "AdmissionID", vr: LO, vm: "1" },
    E { tag: Tag(0x0038, 0x0020), alias: "AdmittingDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0038, 0x0021), alias: "AdmittingTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0038, 0x0050), alias: "SpecialNeeds", vr: LO, vm: "1" },
    E { tag: Tag(0x0038, 0x0300), alias: "CurrentPatientLocation", vr: LO, vm: "1" },
    E { tag: Tag(0x0038, 0x0400), alias: "PatientInstitutionResidence", vr: LO, vm: "1" },
    E { tag: Tag(0x0038, 0x0500), alias: "PatientState", vr: LO, vm: "1" },
    E { tag: Tag(0x0038, 0x4000), alias: "VisitComments", vr: LT, vm: "1" },
    // group 0040: procedure
    E { tag: Tag(0x0040, 0x0001), alias: "ScheduledStationAETitle", vr: AE, vm: "1-n" },
    E { tag: Tag(0x0040, 0x0002), alias: "ScheduledProcedureStepStartDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0040, 0x0003), alias: "ScheduledProcedureStepStartTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0040, 0x0006), alias: "ScheduledPerformingPhysicianName", vr: PN, vm: "1" },
    E { tag: Tag(0x0040, 0x0007), alias: "ScheduledProcedureStepDescription", vr: LO, vm: "1" },
    E { tag: Tag(0x0040, 0x0009), alias: "ScheduledProcedureStepID", vr: SH, vm: "1" },
    E { tag: Tag(0x0040, 0x0010), alias: "ScheduledStationName", vr: SH, vm: "1-n" },
    E { tag: Tag(0x0040, 0x0011), alias: "ScheduledProcedureStepLocation", vr: SH, vm: "1" },
    E { tag: Tag(0x0040, 0x0012), alias: "PreMedication", vr: LO, vm: "1" },
    E { tag: Tag(0x0040, 0x0241), alias: "PerformedStationAETitle", vr: AE, vm: "1" },
    E { tag: Tag(0x0040, 0x0242), alias: "PerformedStationName", vr: SH, vm: "1" },
    E { tag: Tag(0x0040, 0x0243), alias: "PerformedLocation", vr: SH, vm: "1" },
    E { tag: Tag(0x0040, 0x0244), alias: "PerformedProcedureStepStartDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0040, 0x0245), alias: "PerformedProcedureStepStartTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0040, 0x0250), alias: "PerformedProcedureStepEndDate", vr: DA, vm: "1" },
    E { tag: Tag(0x0040, 0x0251), alias: "PerformedProcedureStepEndTime", vr: TM, vm: "1" },
    E { tag: Tag(0x0040, 0x0253), alias: "PerformedProcedureStepID", vr: SH, vm: "1" },
    E { tag: Tag(0x0040, 0x0254), alias: "PerformedProcedureStepDescription", vr: LO, vm: "1" },
    E { tag: Tag(0x0040, 0x0260), alias: "PerformedProtocolCodeSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0040, 0x0275), alias: "RequestAttributesSequence", vr: SQ, vm: "1" },
    E { tag: Tag(0x0040, 0x0280), alias: "CommentsOnThePerformedProcedureStep", vr: ST, vm: "1" },
    E { tag: Tag(0x0040, 0x1001), alias: "RequestedProcedureID", vr: SH, vm: "1" },
    E { tag: Tag(0x0040, 0x1002), alias: "ReasonForTheRequestedProcedure", vr: LO, vm: "1" },
    E { tag: Tag(0x0040, 0x1400), alias: "RequestedProcedureComments", vr: LT, vm: "1" },
    E { tag: Tag(0x0040, 0xA124), alias: "UID", vr: UI, vm: "1" },
    E { tag: Tag(0x0040, 0xA730), alias: "ContentSequence", vr: SQ, vm: "1" },
    // group 0054: nuclear medicine
    E { tag: Tag(0x0054, 0x0011), alias: "NumberOfEnergyWindows", vr: US, vm: "1" },
    E { tag: Tag(0x0054, 0x0021), alias: "NumberOfDetectors", vr: US, vm: "1" },
    E { tag: Tag(0x0054, 0x0051), alias: "NumberOfRotations", vr: US, vm: "1" },
    E { tag: Tag(0x0054, 0x0081), alias: "NumberOfSlices", vr: US, vm: "1" },
    E { tag: Tag(0x0054, 0x0101), alias: "NumberOfTimeSlices", vr: US, vm: "1" },
    E { tag: Tag(0x0054, 0x0400), alias: "ImageID", vr: SH, vm: "1" },
    // group 0088: storage
    E { tag: Tag(0x0088, 0x0130), alias: "StorageMediaFileSetID", vr: SH, vm: "1" },
    E { tag: Tag(0x0088, 0x0140), alias: "StorageMediaFileSetUID", vr: UI, vm: "1" },
    // group 2050: presentation LUT
    E { tag: Tag(0x2050, 0x0020), alias: "PresentationLUTShape", vr: CS, vm: "1" },
    // group 7FE0: pixel data
    E { tag: Tag(0x7FE0, 0x0010), alias: "PixelData", vr: OW, vm: "1" },
    // group FFFE: item delimitation
    E { tag: Tag(0xFFFE, 0xE000), alias: "Item", vr: UN, vm: "1" },
    E { tag: Tag(0xFFFE, 0xE00D), alias: "ItemDelimitationItem", vr: UN, vm: "1" },
    E { tag: Tag(0xFFFE, 0xE0DD), alias: "SequenceDelimitationItem", vr: UN, vm: "1" },
];
