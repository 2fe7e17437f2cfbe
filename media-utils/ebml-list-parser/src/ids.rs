// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT
// or http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Element IDs of the EBML header and the Matroska/WebM schema.
//!
//! IDs are stored with their length marker bits intact, exactly as they
//! appear in the byte stream (e.g. `SEGMENT` is `0x1853_8067`).

/// Element ID wrapper that formats as `Name (0x...)`.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct IdFmt(pub u32);

impl std::fmt::Debug for IdFmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl std::fmt::Display for IdFmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match name(self.0) {
            Some(name) => write!(f, "{name} (0x{:x})", self.0),
            None => write!(f, "0x{:x}", self.0),
        }
    }
}

macro_rules! impl_ids {
    ( $( ($name:ident, $display:expr, $val:expr) ),* $(,)? ) => {
        $(
            pub const $name: u32 = $val;
        )*

        /// Returns the schema name of a known element ID.
        pub fn name(id: u32) -> Option<&'static str> {
            match id {
                $(
                    $val => Some($display),
                )*
                _ => None,
            }
        }
    };
}

// See https://www.matroska.org/technical/elements.html
// https://github.com/ietf-wg-cellar/matroska-specification/blob/master/ebml_matroska.xml

impl_ids!(
    // What an ID with all of its data bits set decodes to.
    (RESERVED, "Reserved", 0x1FFF_FFFF),
    // Global elements, valid in any list.
    (VOID, "Void", 0xEC),
    (CRC32, "CRC-32", 0xBF),
    // EBML header
    (EBML_HEADER, "EBML", 0x1A45_DFA3),
    (EBML_VERSION, "EBMLVersion", 0x4286),
    (EBML_READ_VERSION, "EBMLReadVersion", 0x42F7),
    (EBML_MAX_ID_LENGTH, "EBMLMaxIDLength", 0x42F2),
    (EBML_MAX_SIZE_LENGTH, "EBMLMaxSizeLength", 0x42F3),
    (DOC_TYPE, "DocType", 0x4282),
    (DOC_TYPE_VERSION, "DocTypeVersion", 0x4287),
    (DOC_TYPE_READ_VERSION, "DocTypeReadVersion", 0x4285),
    // Segment
    (SEGMENT, "Segment", 0x1853_8067),
    // Meta seek
    (SEEK_HEAD, "SeekHead", 0x114D_9B74),
    (SEEK, "Seek", 0x4DBB),
    (SEEK_ID, "SeekID", 0x53AB),
    (SEEK_POSITION, "SeekPosition", 0x53AC),
    // Segment information
    (INFO, "Info", 0x1549_A966),
    (SEGMENT_UID, "SegmentUID", 0x73A4),
    (SEGMENT_FILENAME, "SegmentFilename", 0x7384),
    (PREV_UID, "PrevUID", 0x3C_B923),
    (PREV_FILENAME, "PrevFilename", 0x3C_83AB),
    (NEXT_UID, "NextUID", 0x3E_B923),
    (NEXT_FILENAME, "NextFilename", 0x3E_83BB),
    (SEGMENT_FAMILY, "SegmentFamily", 0x4444),
    (CHAPTER_TRANSLATE, "ChapterTranslate", 0x6924),
    (CHAPTER_TRANSLATE_EDITION_UID, "ChapterTranslateEditionUID", 0x69FC),
    (CHAPTER_TRANSLATE_CODEC, "ChapterTranslateCodec", 0x69BF),
    (CHAPTER_TRANSLATE_ID, "ChapterTranslateID", 0x69A5),
    (TIMECODE_SCALE, "TimestampScale", 0x2A_D7B1),
    (DURATION, "Duration", 0x4489),
    (DATE_UTC, "DateUTC", 0x4461),
    (TITLE, "Title", 0x7BA9),
    (MUXING_APP, "MuxingApp", 0x4D80),
    (WRITING_APP, "WritingApp", 0x5741),
    // Cluster
    (CLUSTER, "Cluster", 0x1F43_B675),
    (TIMECODE, "Timestamp", 0xE7),
    (SILENT_TRACKS, "SilentTracks", 0x5854),
    (SILENT_TRACK_NUMBER, "SilentTrackNumber", 0x58D7),
    (POSITION, "Position", 0xA7),
    (PREV_SIZE, "PrevSize", 0xAB),
    (SIMPLE_BLOCK, "SimpleBlock", 0xA3),
    (BLOCK_GROUP, "BlockGroup", 0xA0),
    (BLOCK, "Block", 0xA1),
    (BLOCK_VIRTUAL, "BlockVirtual", 0xA2),
    (BLOCK_ADDITIONS, "BlockAdditions", 0x75A1),
    (BLOCK_MORE, "BlockMore", 0xA6),
    (BLOCK_ADD_ID, "BlockAddID", 0xEE),
    (BLOCK_ADDITIONAL, "BlockAdditional", 0xA5),
    (BLOCK_DURATION, "BlockDuration", 0x9B),
    (REFERENCE_PRIORITY, "ReferencePriority", 0xFA),
    (REFERENCE_BLOCK, "ReferenceBlock", 0xFB),
    (REFERENCE_VIRTUAL, "ReferenceVirtual", 0xFD),
    (CODEC_STATE, "CodecState", 0xA4),
    (DISCARD_PADDING, "DiscardPadding", 0x75A2),
    (SLICES, "Slices", 0x8E),
    (REFERENCE_FRAME, "ReferenceFrame", 0xC8),
    (ENCRYPTED_BLOCK, "EncryptedBlock", 0xAF),
    // Tracks
    (TRACKS, "Tracks", 0x1654_AE6B),
    (TRACK_ENTRY, "TrackEntry", 0xAE),
    (TRACK_NUMBER, "TrackNumber", 0xD7),
    (TRACK_UID, "TrackUID", 0x73C5),
    (TRACK_TYPE, "TrackType", 0x83),
    (FLAG_ENABLED, "FlagEnabled", 0xB9),
    (FLAG_DEFAULT, "FlagDefault", 0x88),
    (FLAG_FORCED, "FlagForced", 0x55AA),
    (FLAG_LACING, "FlagLacing", 0x9C),
    (MIN_CACHE, "MinCache", 0x6DE7),
    (MAX_CACHE, "MaxCache", 0x6DF8),
    (DEFAULT_DURATION, "DefaultDuration", 0x23_E383),
    (TRACK_TIMECODE_SCALE, "TrackTimestampScale", 0x23_314F),
    (MAX_BLOCK_ADDITION_ID, "MaxBlockAdditionID", 0x55EE),
    (NAME, "Name", 0x536E),
    (LANGUAGE, "Language", 0x22_B59C),
    (CODEC_ID, "CodecID", 0x86),
    (CODEC_PRIVATE, "CodecPrivate", 0x63A2),
    (CODEC_NAME, "CodecName", 0x25_8688),
    (ATTACHMENT_LINK, "AttachmentLink", 0x7446),
    (CODEC_DECODE_ALL, "CodecDecodeAll", 0xAA),
    (TRACK_OVERLAY, "TrackOverlay", 0x6FAB),
    (CODEC_DELAY, "CodecDelay", 0x56AA),
    (SEEK_PRE_ROLL, "SeekPreRoll", 0x56BB),
    (TRACK_TRANSLATE, "TrackTranslate", 0x6624),
    (TRACK_TRANSLATE_EDITION_UID, "TrackTranslateEditionUID", 0x66FC),
    (TRACK_TRANSLATE_CODEC, "TrackTranslateCodec", 0x66BF),
    (TRACK_TRANSLATE_TRACK_ID, "TrackTranslateTrackID", 0x66A5),
    // Video
    (VIDEO, "Video", 0xE0),
    (FLAG_INTERLACED, "FlagInterlaced", 0x9A),
    (STEREO_MODE, "StereoMode", 0x53B8),
    (ALPHA_MODE, "AlphaMode", 0x53C0),
    (PIXEL_WIDTH, "PixelWidth", 0xB0),
    (PIXEL_HEIGHT, "PixelHeight", 0xBA),
    (PIXEL_CROP_BOTTOM, "PixelCropBottom", 0x54AA),
    (PIXEL_CROP_TOP, "PixelCropTop", 0x54BB),
    (PIXEL_CROP_LEFT, "PixelCropLeft", 0x54CC),
    (PIXEL_CROP_RIGHT, "PixelCropRight", 0x54DD),
    (DISPLAY_WIDTH, "DisplayWidth", 0x54B0),
    (DISPLAY_HEIGHT, "DisplayHeight", 0x54BA),
    (DISPLAY_UNIT, "DisplayUnit", 0x54B2),
    (ASPECT_RATIO_TYPE, "AspectRatioType", 0x54B3),
    (COLOR_SPACE, "UncompressedFourCC", 0x2E_B524),
    (FRAME_RATE, "FrameRate", 0x23_83E3),
    // Colour
    (COLOUR, "Colour", 0x55B0),
    (MATRIX_COEFFICIENTS, "MatrixCoefficients", 0x55B1),
    (BITS_PER_CHANNEL, "BitsPerChannel", 0x55B2),
    (CHROMA_SUBSAMPLING_HORZ, "ChromaSubsamplingHorz", 0x55B3),
    (CHROMA_SUBSAMPLING_VERT, "ChromaSubsamplingVert", 0x55B4),
    (CB_SUBSAMPLING_HORZ, "CbSubsamplingHorz", 0x55B5),
    (CB_SUBSAMPLING_VERT, "CbSubsamplingVert", 0x55B6),
    (CHROMA_SITING_HORZ, "ChromaSitingHorz", 0x55B7),
    (CHROMA_SITING_VERT, "ChromaSitingVert", 0x55B8),
    (RANGE, "Range", 0x55B9),
    (TRANSFER_CHARACTERISTICS, "TransferCharacteristics", 0x55BA),
    (PRIMARIES, "Primaries", 0x55BB),
    (MAX_CLL, "MaxCLL", 0x55BC),
    (MAX_FALL, "MaxFALL", 0x55BD),
    (MASTERING_METADATA, "MasteringMetadata", 0x55D0),
    (PRIMARY_R_CHROMATICITY_X, "PrimaryRChromaticityX", 0x55D1),
    (PRIMARY_R_CHROMATICITY_Y, "PrimaryRChromaticityY", 0x55D2),
    (PRIMARY_G_CHROMATICITY_X, "PrimaryGChromaticityX", 0x55D3),
    (PRIMARY_G_CHROMATICITY_Y, "PrimaryGChromaticityY", 0x55D4),
    (PRIMARY_B_CHROMATICITY_X, "PrimaryBChromaticityX", 0x55D5),
    (PRIMARY_B_CHROMATICITY_Y, "PrimaryBChromaticityY", 0x55D6),
    (WHITE_POINT_CHROMATICITY_X, "WhitePointChromaticityX", 0x55D7),
    (WHITE_POINT_CHROMATICITY_Y, "WhitePointChromaticityY", 0x55D8),
    (LUMINANCE_MAX, "LuminanceMax", 0x55D9),
    (LUMINANCE_MIN, "LuminanceMin", 0x55DA),
    // Projection
    (PROJECTION, "Projection", 0x7670),
    (PROJECTION_TYPE, "ProjectionType", 0x7671),
    (PROJECTION_PRIVATE, "ProjectionPrivate", 0x7672),
    (PROJECTION_POSE_YAW, "ProjectionPoseYaw", 0x7673),
    (PROJECTION_POSE_PITCH, "ProjectionPosePitch", 0x7674),
    (PROJECTION_POSE_ROLL, "ProjectionPoseRoll", 0x7675),
    // Audio
    (AUDIO, "Audio", 0xE1),
    (SAMPLING_FREQUENCY, "SamplingFrequency", 0xB5),
    (OUTPUT_SAMPLING_FREQUENCY, "OutputSamplingFrequency", 0x78B5),
    (CHANNELS, "Channels", 0x9F),
    (CHANNEL_POSITIONS, "ChannelPositions", 0x7D7B),
    (BIT_DEPTH, "BitDepth", 0x6264),
    // Track operations
    (TRACK_OPERATION, "TrackOperation", 0xE2),
    (TRACK_COMBINE_PLANES, "TrackCombinePlanes", 0xE3),
    (TRACK_PLANE, "TrackPlane", 0xE4),
    (TRACK_PLANE_UID, "TrackPlaneUID", 0xE5),
    (TRACK_PLANE_TYPE, "TrackPlaneType", 0xE6),
    (JOIN_BLOCKS, "TrackJoinBlocks", 0xE9),
    (TRACK_JOIN_UID, "TrackJoinUID", 0xED),
    // Content encodings
    (CONTENT_ENCODINGS, "ContentEncodings", 0x6D80),
    (CONTENT_ENCODING, "ContentEncoding", 0x6240),
    (CONTENT_ENCODING_ORDER, "ContentEncodingOrder", 0x5031),
    (CONTENT_ENCODING_SCOPE, "ContentEncodingScope", 0x5032),
    (CONTENT_ENCODING_TYPE, "ContentEncodingType", 0x5033),
    (CONTENT_COMPRESSION, "ContentCompression", 0x5034),
    (CONTENT_COMP_ALGO, "ContentCompAlgo", 0x4254),
    (CONTENT_COMP_SETTINGS, "ContentCompSettings", 0x4255),
    (CONTENT_ENCRYPTION, "ContentEncryption", 0x5035),
    (CONTENT_ENC_ALGO, "ContentEncAlgo", 0x47E1),
    (CONTENT_ENC_KEY_ID, "ContentEncKeyID", 0x47E2),
    (CONTENT_SIGNATURE, "ContentSignature", 0x47E3),
    (CONTENT_SIG_KEY_ID, "ContentSigKeyID", 0x47E4),
    (CONTENT_SIG_ALGO, "ContentSigAlgo", 0x47E5),
    (CONTENT_SIG_HASH_ALGO, "ContentSigHashAlgo", 0x47E6),
    (CONTENT_ENC_AES_SETTINGS, "ContentEncAESSettings", 0x47E7),
    (AES_SETTINGS_CIPHER_MODE, "AESSettingsCipherMode", 0x47E8),
    // Cueing data
    (CUES, "Cues", 0x1C53_BB6B),
    (CUE_POINT, "CuePoint", 0xBB),
    (CUE_TIME, "CueTime", 0xB3),
    (CUE_TRACK_POSITIONS, "CueTrackPositions", 0xB7),
    (CUE_TRACK, "CueTrack", 0xF7),
    (CUE_CLUSTER_POSITION, "CueClusterPosition", 0xF1),
    (CUE_RELATIVE_POSITION, "CueRelativePosition", 0xF0),
    (CUE_DURATION, "CueDuration", 0xB2),
    (CUE_BLOCK_NUMBER, "CueBlockNumber", 0x5378),
    (CUE_CODEC_STATE, "CueCodecState", 0xEA),
    (CUE_REFERENCE, "CueReference", 0xDB),
    (CUE_REF_TIME, "CueRefTime", 0x96),
    (CUE_REF_CLUSTER, "CueRefCluster", 0x97),
    (CUE_REF_NUMBER, "CueRefNumber", 0x535F),
    (CUE_REF_CODEC_STATE, "CueRefCodecState", 0xEB),
    // Attachments
    (ATTACHMENTS, "Attachments", 0x1941_A469),
    (ATTACHED_FILE, "AttachedFile", 0x61A7),
    (FILE_DESCRIPTION, "FileDescription", 0x467E),
    (FILE_NAME, "FileName", 0x466E),
    (FILE_MIME_TYPE, "FileMimeType", 0x4660),
    (FILE_DATA, "FileData", 0x465C),
    (FILE_UID, "FileUID", 0x46AE),
    (FILE_REFERRAL, "FileReferral", 0x4675),
    (FILE_USED_START_TIME, "FileUsedStartTime", 0x4661),
    (FILE_USED_END_TIME, "FileUsedEndTime", 0x4662),
    // Chapters
    (CHAPTERS, "Chapters", 0x1043_A770),
    (EDITION_ENTRY, "EditionEntry", 0x45B9),
    (EDITION_UID, "EditionUID", 0x45BC),
    (EDITION_FLAG_HIDDEN, "EditionFlagHidden", 0x45BD),
    (EDITION_FLAG_DEFAULT, "EditionFlagDefault", 0x45DB),
    (EDITION_FLAG_ORDERED, "EditionFlagOrdered", 0x45DD),
    (CHAPTER_ATOM, "ChapterAtom", 0xB6),
    (CHAPTER_UID, "ChapterUID", 0x73C4),
    (CHAPTER_STRING_UID, "ChapterStringUID", 0x5654),
    (CHAPTER_TIME_START, "ChapterTimeStart", 0x91),
    (CHAPTER_TIME_END, "ChapterTimeEnd", 0x92),
    (CHAPTER_FLAG_HIDDEN, "ChapterFlagHidden", 0x98),
    (CHAPTER_FLAG_ENABLED, "ChapterFlagEnabled", 0x4598),
    (CHAPTER_SEGMENT_UID, "ChapterSegmentUID", 0x6E67),
    (CHAPTER_SEGMENT_EDITION_UID, "ChapterSegmentEditionUID", 0x6EBC),
    (CHAPTER_PHYSICAL_EQUIV, "ChapterPhysicalEquiv", 0x63C3),
    (CHAPTER_TRACK, "ChapterTrack", 0x8F),
    (CHAPTER_TRACK_NUMBER, "ChapterTrackUID", 0x89),
    (CHAPTER_DISPLAY, "ChapterDisplay", 0x80),
    (CHAP_STRING, "ChapString", 0x85),
    (CHAP_LANGUAGE, "ChapLanguage", 0x437C),
    (CHAP_COUNTRY, "ChapCountry", 0x437E),
    (CHAP_PROCESS, "ChapProcess", 0x6944),
    (CHAP_PROCESS_CODEC_ID, "ChapProcessCodecID", 0x6955),
    (CHAP_PROCESS_PRIVATE, "ChapProcessPrivate", 0x450D),
    (CHAP_PROCESS_COMMAND, "ChapProcessCommand", 0x6911),
    (CHAP_PROCESS_TIME, "ChapProcessTime", 0x6922),
    (CHAP_PROCESS_DATA, "ChapProcessData", 0x6933),
    // Tagging
    (TAGS, "Tags", 0x1254_C367),
    (TAG, "Tag", 0x7373),
    (TARGETS, "Targets", 0x63C0),
    (TARGET_TYPE_VALUE, "TargetTypeValue", 0x68CA),
    (TARGET_TYPE, "TargetType", 0x63CA),
    (TAG_TRACK_UID, "TagTrackUID", 0x63C5),
    (TAG_EDITION_UID, "TagEditionUID", 0x63C9),
    (TAG_CHAPTER_UID, "TagChapterUID", 0x63C4),
    (TAG_ATTACHMENT_UID, "TagAttachmentUID", 0x63C6),
    (SIMPLE_TAG, "SimpleTag", 0x67C8),
    (TAG_NAME, "TagName", 0x45A3),
    (TAG_LANGUAGE, "TagLanguage", 0x447A),
    (TAG_DEFAULT, "TagDefault", 0x4484),
    (TAG_STRING, "TagString", 0x4487),
    (TAG_BINARY, "TagBinary", 0x4485),
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_and_formatting() {
        assert_eq!(name(SEGMENT), Some("Segment"));
        assert_eq!(name(0x1234), None);
        assert_eq!(format!("{}", IdFmt(CLUSTER)), "Cluster (0x1f43b675)");
        assert_eq!(format!("{}", IdFmt(0x4321)), "0x4321");
        assert_eq!(format!("{:?}", IdFmt(VOID)), "0xec");
    }
}
