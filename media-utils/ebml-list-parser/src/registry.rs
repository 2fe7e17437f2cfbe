// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT
// or http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Which elements each list may contain, and how their payloads decode.
//!
//! Elements outside the WebM subset that may still appear in Matroska files
//! are listed as [ElementKind::Skip] so that they are stepped over rather
//! than rejected.

use crate::ids::*;

/// How the payload of an element is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A list of child elements.
    List,
    UInt,
    Float,
    Binary,
    String,
    /// Consumed without being decoded or reported.
    Skip,
}

use ElementKind::*;

type ChildTable = &'static [(ElementKind, u32)];

/// A list element, its nesting level and the children it may contain.
#[derive(Debug)]
pub struct ListElementInfo {
    pub id: u32,
    pub level: u8,
    pub children: ChildTable,
}

const EBML_HEADER_IDS: ChildTable = &[
    (UInt, EBML_VERSION),
    (UInt, EBML_READ_VERSION),
    (UInt, EBML_MAX_ID_LENGTH),
    (UInt, EBML_MAX_SIZE_LENGTH),
    (String, DOC_TYPE),
    (UInt, DOC_TYPE_VERSION),
    (UInt, DOC_TYPE_READ_VERSION),
];

const SEGMENT_IDS: ChildTable = &[
    (List, SEEK_HEAD),
    (List, INFO),
    (List, CLUSTER),
    (List, TRACKS),
    (List, CUES),
    (List, ATTACHMENTS),
    (List, CHAPTERS),
    (List, TAGS),
];

const SEEK_HEAD_IDS: ChildTable = &[(List, SEEK)];

const SEEK_IDS: ChildTable = &[(Binary, SEEK_ID), (UInt, SEEK_POSITION)];

const INFO_IDS: ChildTable = &[
    (Binary, SEGMENT_UID),
    (String, SEGMENT_FILENAME),
    (Binary, PREV_UID),
    (String, PREV_FILENAME),
    (Binary, NEXT_UID),
    (String, NEXT_FILENAME),
    (Binary, SEGMENT_FAMILY),
    (List, CHAPTER_TRANSLATE),
    (UInt, TIMECODE_SCALE),
    (Float, DURATION),
    (Binary, DATE_UTC),
    (String, TITLE),
    (String, MUXING_APP),
    (String, WRITING_APP),
];

const CHAPTER_TRANSLATE_IDS: ChildTable = &[
    (UInt, CHAPTER_TRANSLATE_EDITION_UID),
    (UInt, CHAPTER_TRANSLATE_CODEC),
    (Binary, CHAPTER_TRANSLATE_ID),
];

const CLUSTER_IDS: ChildTable = &[
    (UInt, TIMECODE),
    (List, SILENT_TRACKS),
    (UInt, POSITION),
    (UInt, PREV_SIZE),
    (Binary, SIMPLE_BLOCK),
    (List, BLOCK_GROUP),
    (Skip, ENCRYPTED_BLOCK),
];

const SILENT_TRACKS_IDS: ChildTable = &[(UInt, SILENT_TRACK_NUMBER)];

const BLOCK_GROUP_IDS: ChildTable = &[
    (Binary, BLOCK),
    (Skip, BLOCK_VIRTUAL),
    (List, BLOCK_ADDITIONS),
    (UInt, BLOCK_DURATION),
    (UInt, REFERENCE_PRIORITY),
    // Signed integers are reported as raw bytes.
    (Binary, REFERENCE_BLOCK),
    (Skip, REFERENCE_VIRTUAL),
    (Skip, CODEC_STATE),
    (Binary, DISCARD_PADDING),
    (Skip, SLICES),
    (Skip, REFERENCE_FRAME),
];

const BLOCK_ADDITIONS_IDS: ChildTable = &[(List, BLOCK_MORE)];

const BLOCK_MORE_IDS: ChildTable = &[(UInt, BLOCK_ADD_ID), (Binary, BLOCK_ADDITIONAL)];

const TRACKS_IDS: ChildTable = &[(List, TRACK_ENTRY)];

const TRACK_ENTRY_IDS: ChildTable = &[
    (UInt, TRACK_NUMBER),
    (UInt, TRACK_UID),
    (UInt, TRACK_TYPE),
    (UInt, FLAG_ENABLED),
    (UInt, FLAG_DEFAULT),
    (UInt, FLAG_FORCED),
    (UInt, FLAG_LACING),
    (UInt, MIN_CACHE),
    (UInt, MAX_CACHE),
    (UInt, DEFAULT_DURATION),
    (Float, TRACK_TIMECODE_SCALE),
    (UInt, MAX_BLOCK_ADDITION_ID),
    (String, NAME),
    (String, LANGUAGE),
    (String, CODEC_ID),
    (Binary, CODEC_PRIVATE),
    (String, CODEC_NAME),
    (UInt, ATTACHMENT_LINK),
    (UInt, CODEC_DECODE_ALL),
    (Skip, TRACK_OVERLAY),
    (UInt, CODEC_DELAY),
    (UInt, SEEK_PRE_ROLL),
    (List, TRACK_TRANSLATE),
    (List, VIDEO),
    (List, AUDIO),
    (List, TRACK_OPERATION),
    (List, CONTENT_ENCODINGS),
];

const TRACK_TRANSLATE_IDS: ChildTable = &[
    (UInt, TRACK_TRANSLATE_EDITION_UID),
    (UInt, TRACK_TRANSLATE_CODEC),
    (Binary, TRACK_TRANSLATE_TRACK_ID),
];

const VIDEO_IDS: ChildTable = &[
    (UInt, FLAG_INTERLACED),
    (UInt, STEREO_MODE),
    (UInt, ALPHA_MODE),
    (UInt, PIXEL_WIDTH),
    (UInt, PIXEL_HEIGHT),
    (UInt, PIXEL_CROP_BOTTOM),
    (UInt, PIXEL_CROP_TOP),
    (UInt, PIXEL_CROP_LEFT),
    (UInt, PIXEL_CROP_RIGHT),
    (UInt, DISPLAY_WIDTH),
    (UInt, DISPLAY_HEIGHT),
    (UInt, DISPLAY_UNIT),
    (UInt, ASPECT_RATIO_TYPE),
    (Binary, COLOR_SPACE),
    (Float, FRAME_RATE),
    (List, COLOUR),
    (List, PROJECTION),
];

const COLOUR_IDS: ChildTable = &[
    (UInt, MATRIX_COEFFICIENTS),
    (UInt, BITS_PER_CHANNEL),
    (UInt, CHROMA_SUBSAMPLING_HORZ),
    (UInt, CHROMA_SUBSAMPLING_VERT),
    (UInt, CB_SUBSAMPLING_HORZ),
    (UInt, CB_SUBSAMPLING_VERT),
    (UInt, CHROMA_SITING_HORZ),
    (UInt, CHROMA_SITING_VERT),
    (UInt, RANGE),
    (UInt, TRANSFER_CHARACTERISTICS),
    (UInt, PRIMARIES),
    (UInt, MAX_CLL),
    (UInt, MAX_FALL),
    (List, MASTERING_METADATA),
];

const MASTERING_METADATA_IDS: ChildTable = &[
    (Float, PRIMARY_R_CHROMATICITY_X),
    (Float, PRIMARY_R_CHROMATICITY_Y),
    (Float, PRIMARY_G_CHROMATICITY_X),
    (Float, PRIMARY_G_CHROMATICITY_Y),
    (Float, PRIMARY_B_CHROMATICITY_X),
    (Float, PRIMARY_B_CHROMATICITY_Y),
    (Float, WHITE_POINT_CHROMATICITY_X),
    (Float, WHITE_POINT_CHROMATICITY_Y),
    (Float, LUMINANCE_MAX),
    (Float, LUMINANCE_MIN),
];

const PROJECTION_IDS: ChildTable = &[
    (UInt, PROJECTION_TYPE),
    (Binary, PROJECTION_PRIVATE),
    (Float, PROJECTION_POSE_YAW),
    (Float, PROJECTION_POSE_PITCH),
    (Float, PROJECTION_POSE_ROLL),
];

const AUDIO_IDS: ChildTable = &[
    (Float, SAMPLING_FREQUENCY),
    (Float, OUTPUT_SAMPLING_FREQUENCY),
    (UInt, CHANNELS),
    (Binary, CHANNEL_POSITIONS),
    (UInt, BIT_DEPTH),
];

const TRACK_OPERATION_IDS: ChildTable = &[(List, TRACK_COMBINE_PLANES), (List, JOIN_BLOCKS)];

const TRACK_COMBINE_PLANES_IDS: ChildTable = &[(List, TRACK_PLANE)];

const TRACK_PLANE_IDS: ChildTable = &[(UInt, TRACK_PLANE_UID), (UInt, TRACK_PLANE_TYPE)];

const JOIN_BLOCKS_IDS: ChildTable = &[(UInt, TRACK_JOIN_UID)];

const CONTENT_ENCODINGS_IDS: ChildTable = &[(List, CONTENT_ENCODING)];

const CONTENT_ENCODING_IDS: ChildTable = &[
    (UInt, CONTENT_ENCODING_ORDER),
    (UInt, CONTENT_ENCODING_SCOPE),
    (UInt, CONTENT_ENCODING_TYPE),
    (List, CONTENT_COMPRESSION),
    (List, CONTENT_ENCRYPTION),
];

const CONTENT_COMPRESSION_IDS: ChildTable = &[
    (UInt, CONTENT_COMP_ALGO),
    (Binary, CONTENT_COMP_SETTINGS),
];

const CONTENT_ENCRYPTION_IDS: ChildTable = &[
    (UInt, CONTENT_ENC_ALGO),
    (Binary, CONTENT_ENC_KEY_ID),
    (Binary, CONTENT_SIGNATURE),
    (Binary, CONTENT_SIG_KEY_ID),
    (UInt, CONTENT_SIG_ALGO),
    (UInt, CONTENT_SIG_HASH_ALGO),
    (List, CONTENT_ENC_AES_SETTINGS),
];

const CONTENT_ENC_AES_SETTINGS_IDS: ChildTable = &[(UInt, AES_SETTINGS_CIPHER_MODE)];

const CUES_IDS: ChildTable = &[(List, CUE_POINT)];

const CUE_POINT_IDS: ChildTable = &[(UInt, CUE_TIME), (List, CUE_TRACK_POSITIONS)];

const CUE_TRACK_POSITIONS_IDS: ChildTable = &[
    (UInt, CUE_TRACK),
    (UInt, CUE_CLUSTER_POSITION),
    (UInt, CUE_RELATIVE_POSITION),
    (UInt, CUE_DURATION),
    (UInt, CUE_BLOCK_NUMBER),
    (UInt, CUE_CODEC_STATE),
    (List, CUE_REFERENCE),
];

const CUE_REFERENCE_IDS: ChildTable = &[
    (UInt, CUE_REF_TIME),
    (Skip, CUE_REF_CLUSTER),
    (Skip, CUE_REF_NUMBER),
    (Skip, CUE_REF_CODEC_STATE),
];

const ATTACHMENTS_IDS: ChildTable = &[(List, ATTACHED_FILE)];

const ATTACHED_FILE_IDS: ChildTable = &[
    (String, FILE_DESCRIPTION),
    (String, FILE_NAME),
    (String, FILE_MIME_TYPE),
    (Binary, FILE_DATA),
    (UInt, FILE_UID),
    (Skip, FILE_REFERRAL),
    (Skip, FILE_USED_START_TIME),
    (Skip, FILE_USED_END_TIME),
];

const CHAPTERS_IDS: ChildTable = &[(List, EDITION_ENTRY)];

const EDITION_ENTRY_IDS: ChildTable = &[
    (UInt, EDITION_UID),
    (UInt, EDITION_FLAG_HIDDEN),
    (UInt, EDITION_FLAG_DEFAULT),
    (UInt, EDITION_FLAG_ORDERED),
    (List, CHAPTER_ATOM),
];

const CHAPTER_ATOM_IDS: ChildTable = &[
    (UInt, CHAPTER_UID),
    (String, CHAPTER_STRING_UID),
    (UInt, CHAPTER_TIME_START),
    (UInt, CHAPTER_TIME_END),
    (UInt, CHAPTER_FLAG_HIDDEN),
    (UInt, CHAPTER_FLAG_ENABLED),
    (Binary, CHAPTER_SEGMENT_UID),
    (UInt, CHAPTER_SEGMENT_EDITION_UID),
    (UInt, CHAPTER_PHYSICAL_EQUIV),
    (List, CHAPTER_TRACK),
    (List, CHAPTER_DISPLAY),
    (List, CHAP_PROCESS),
];

const CHAPTER_TRACK_IDS: ChildTable = &[(UInt, CHAPTER_TRACK_NUMBER)];

const CHAPTER_DISPLAY_IDS: ChildTable = &[
    (String, CHAP_STRING),
    (String, CHAP_LANGUAGE),
    (String, CHAP_COUNTRY),
];

const CHAP_PROCESS_IDS: ChildTable = &[
    (UInt, CHAP_PROCESS_CODEC_ID),
    (Binary, CHAP_PROCESS_PRIVATE),
    (List, CHAP_PROCESS_COMMAND),
];

const CHAP_PROCESS_COMMAND_IDS: ChildTable = &[(UInt, CHAP_PROCESS_TIME), (Binary, CHAP_PROCESS_DATA)];

const TAGS_IDS: ChildTable = &[(List, TAG)];

const TAG_IDS: ChildTable = &[(List, TARGETS), (List, SIMPLE_TAG)];

const TARGETS_IDS: ChildTable = &[
    (UInt, TARGET_TYPE_VALUE),
    (String, TARGET_TYPE),
    (UInt, TAG_TRACK_UID),
    (UInt, TAG_EDITION_UID),
    (UInt, TAG_CHAPTER_UID),
    (UInt, TAG_ATTACHMENT_UID),
];

const SIMPLE_TAG_IDS: ChildTable = &[
    (String, TAG_NAME),
    (String, TAG_LANGUAGE),
    (UInt, TAG_DEFAULT),
    (String, TAG_STRING),
    (Binary, TAG_BINARY),
];

macro_rules! list_info {
    ( $( ($id:expr, $level:expr, $children:expr) ),* $(,)? ) => {
        &[
            $(
                ListElementInfo {
                    id: $id,
                    level: $level,
                    children: $children,
                },
            )*
        ]
    };
}

static LIST_ELEMENT_INFO: &[ListElementInfo] = list_info!(
    (CLUSTER, 1, CLUSTER_IDS),
    (EBML_HEADER, 0, EBML_HEADER_IDS),
    (SEGMENT, 0, SEGMENT_IDS),
    (SEEK_HEAD, 1, SEEK_HEAD_IDS),
    (SEEK, 2, SEEK_IDS),
    (INFO, 1, INFO_IDS),
    (CHAPTER_TRANSLATE, 2, CHAPTER_TRANSLATE_IDS),
    (SILENT_TRACKS, 2, SILENT_TRACKS_IDS),
    (BLOCK_GROUP, 2, BLOCK_GROUP_IDS),
    (BLOCK_ADDITIONS, 3, BLOCK_ADDITIONS_IDS),
    (BLOCK_MORE, 4, BLOCK_MORE_IDS),
    (TRACKS, 1, TRACKS_IDS),
    (TRACK_ENTRY, 2, TRACK_ENTRY_IDS),
    (TRACK_TRANSLATE, 3, TRACK_TRANSLATE_IDS),
    (VIDEO, 3, VIDEO_IDS),
    (COLOUR, 4, COLOUR_IDS),
    (MASTERING_METADATA, 5, MASTERING_METADATA_IDS),
    (PROJECTION, 4, PROJECTION_IDS),
    (AUDIO, 3, AUDIO_IDS),
    (TRACK_OPERATION, 3, TRACK_OPERATION_IDS),
    (TRACK_COMBINE_PLANES, 4, TRACK_COMBINE_PLANES_IDS),
    (TRACK_PLANE, 5, TRACK_PLANE_IDS),
    (JOIN_BLOCKS, 4, JOIN_BLOCKS_IDS),
    (CONTENT_ENCODINGS, 3, CONTENT_ENCODINGS_IDS),
    (CONTENT_ENCODING, 4, CONTENT_ENCODING_IDS),
    (CONTENT_COMPRESSION, 5, CONTENT_COMPRESSION_IDS),
    (CONTENT_ENCRYPTION, 5, CONTENT_ENCRYPTION_IDS),
    (CONTENT_ENC_AES_SETTINGS, 6, CONTENT_ENC_AES_SETTINGS_IDS),
    (CUES, 1, CUES_IDS),
    (CUE_POINT, 2, CUE_POINT_IDS),
    (CUE_TRACK_POSITIONS, 3, CUE_TRACK_POSITIONS_IDS),
    (CUE_REFERENCE, 4, CUE_REFERENCE_IDS),
    (ATTACHMENTS, 1, ATTACHMENTS_IDS),
    (ATTACHED_FILE, 2, ATTACHED_FILE_IDS),
    (CHAPTERS, 1, CHAPTERS_IDS),
    (EDITION_ENTRY, 2, EDITION_ENTRY_IDS),
    (CHAPTER_ATOM, 3, CHAPTER_ATOM_IDS),
    (CHAPTER_TRACK, 4, CHAPTER_TRACK_IDS),
    (CHAPTER_DISPLAY, 4, CHAPTER_DISPLAY_IDS),
    (CHAP_PROCESS, 4, CHAP_PROCESS_IDS),
    (CHAP_PROCESS_COMMAND, 5, CHAP_PROCESS_COMMAND_IDS),
    (TAGS, 1, TAGS_IDS),
    (TAG, 2, TAG_IDS),
    (TARGETS, 3, TARGETS_IDS),
    (SIMPLE_TAG, 3, SIMPLE_TAG_IDS),
);

/// Look up the table entry of a list element.
pub fn find_list_info(id: u32) -> Option<&'static ListElementInfo> {
    LIST_ELEMENT_INFO.iter().find(|info| info.id == id)
}

/// Nesting level of a list element. Top-level lists (EBML header, Segment)
/// are at level 0.
pub fn list_level(id: u32) -> Option<u8> {
    find_list_info(id).map(|info| info.level)
}

/// Kind of `id` as a child of the list described by `parent`, or `None` if
/// `parent` may not contain it.
pub fn find_id_kind(id: u32, parent: &ListElementInfo) -> Option<ElementKind> {
    // Global elements can appear anywhere.
    if id == VOID || id == CRC32 {
        return Some(Skip);
    }
    parent
        .children
        .iter()
        .find(|(_, child)| *child == id)
        .map(|(kind, _)| *kind)
}

/// Kind of `id` as a child of the list `parent_id`.
pub fn classify_child(parent_id: u32, id: u32) -> Option<ElementKind> {
    find_list_info(parent_id).and_then(|parent| find_id_kind(id, parent))
}

/// Whether `candidate` belongs to a context enclosing the list `current`
/// rather than to `current` itself.
///
/// Used to detect the end of lists with unknown size.
pub fn is_sibling_or_ancestor(current: u32, candidate: u32) -> bool {
    if current == CLUSTER && SEGMENT_IDS.iter().any(|(_, id)| *id == candidate) {
        return true;
    }
    // Siblings of the Segment.
    candidate == SEGMENT || candidate == EBML_HEADER
}

/// Whether the list `id` may be written with an unknown size.
pub fn may_have_unknown_size(id: u32) -> bool {
    id == SEGMENT || id == CLUSTER
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(classify_child(SEGMENT, CLUSTER), Some(List));
        assert_eq!(classify_child(CLUSTER, SIMPLE_BLOCK), Some(Binary));
        assert_eq!(classify_child(INFO, DURATION), Some(Float));
        assert_eq!(classify_child(TRACK_ENTRY, CODEC_ID), Some(String));
        assert_eq!(classify_child(CLUSTER, TIMECODE), Some(UInt));
        assert_eq!(classify_child(CLUSTER, CODEC_ID), None);
        assert_eq!(classify_child(SIMPLE_BLOCK, TIMECODE), None);
    }

    #[test]
    fn global_ids_are_skipped_everywhere() {
        for info in LIST_ELEMENT_INFO {
            assert_eq!(find_id_kind(VOID, info), Some(Skip));
            assert_eq!(find_id_kind(CRC32, info), Some(Skip));
        }
    }

    #[test]
    fn list_children_are_registered_one_level_down() {
        for info in LIST_ELEMENT_INFO {
            for (kind, child) in info.children {
                if *kind == List {
                    let child_info = find_list_info(*child)
                        .unwrap_or_else(|| panic!("no list info for 0x{child:x}"));
                    assert_eq!(child_info.level, info.level + 1, "0x{child:x}");
                }
            }
        }
    }

    #[test]
    fn sibling_or_ancestor() {
        assert!(is_sibling_or_ancestor(CLUSTER, CLUSTER));
        assert!(is_sibling_or_ancestor(CLUSTER, CUES));
        assert!(is_sibling_or_ancestor(CLUSTER, SEGMENT));
        assert!(is_sibling_or_ancestor(SEGMENT, EBML_HEADER));
        assert!(!is_sibling_or_ancestor(SEGMENT, CUES));
        assert!(!is_sibling_or_ancestor(CLUSTER, SIMPLE_BLOCK));
    }

    #[test]
    fn levels() {
        assert_eq!(list_level(SEGMENT), Some(0));
        assert_eq!(list_level(CLUSTER), Some(1));
        assert_eq!(list_level(CONTENT_ENC_AES_SETTINGS), Some(6));
        assert_eq!(list_level(SIMPLE_BLOCK), None);
        assert!(may_have_unknown_size(CLUSTER));
        assert!(!may_have_unknown_size(TRACKS));
    }
}
