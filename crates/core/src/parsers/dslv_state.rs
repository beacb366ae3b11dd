use std::collections::HashMap;

use log::{debug, info, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

use super::parse_int_list;
use crate::model::frame::FrameInvariant;
use crate::model::{FrameFields, FrameRecord, ItemId, Target};

const FRAME_TAG: &str = "DSLVState";

const POSITIONS: &str = "Positions";
const TOPS: &str = "Tops";
const BOTTOMS: &str = "Bottoms";
const EDGES: &str = "ShuffleEdges";
const SOURCE: &str = "SrcPos";
const SOURCE_HEIGHT: &str = "SrcHeight";
const FIRST_TARGET: &str = "FirstExpPos";
const FIRST_GAP: &str = "FirstExpBlankHeight";
const SECOND_TARGET: &str = "SecondExpPos";
const SECOND_GAP: &str = "SecondExpBlankHeight";
const VIEW_HEIGHT: &str = "ViewHeight";
const FLOAT_Y: &str = "FloatY";
const TOUCH_Y: &str = "LastY";

#[derive(Debug, Error)]
pub enum MalformedTraceError {
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("frame {frame}: missing <{field}>")]
    MissingField { frame: usize, field: &'static str },
    #[error("frame {frame}: <{field}> is not an integer: {value:?}")]
    InvalidInteger {
        frame: usize,
        field: &'static str,
        value: String,
    },
    #[error("frame {frame}: <{field}> has {found} entries, <Positions> has {expected}")]
    LengthMismatch {
        frame: usize,
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("frame {frame}: item {id} listed twice in <Positions>")]
    DuplicateItem { frame: usize, id: ItemId },
    #[error("frame {frame}: <DSLVState> not closed")]
    TruncatedFrame { frame: usize },
    #[error("no <DSLVState> entries found")]
    Empty,
}

/// Parse a drag-sort state trace into its frames, in document order.
///
/// The input is the XML written by the list's state tracker: a
/// `<DSLVStates>` root holding one `<DSLVState>` per recorded layout pass.
/// A missing closing root tag is tolerated since the recorder may be
/// stopped mid-gesture; an unclosed `<DSLVState>` is not.
pub fn parse_trace(data: &[u8]) -> Result<Vec<FrameRecord>, MalformedTraceError> {
    let mut reader = Reader::from_reader(data);
    reader.trim_text(true);

    let mut frames = Vec::new();
    let mut current: Option<HashMap<String, String>> = None;
    let mut field: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match current.as_mut() {
                    None if name == FRAME_TAG => current = Some(HashMap::new()),
                    None => {}
                    Some(_) if name == FRAME_TAG => {
                        return Err(MalformedTraceError::TruncatedFrame {
                            frame: frames.len(),
                        });
                    }
                    Some(raw) => {
                        raw.entry(name.clone()).or_default();
                        field = Some(name);
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if let Some(raw) = current.as_mut() {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    raw.entry(name).or_default();
                }
            }
            Ok(Event::Text(ref t)) => {
                if let (Some(raw), Some(name)) = (current.as_mut(), field.as_ref()) {
                    let text = t.unescape().map_err(|source| MalformedTraceError::Xml {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    raw.entry(name.clone()).or_default().push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == FRAME_TAG.as_bytes()
                    && let Some(raw) = current.take()
                {
                    let frame = build_frame(frames.len(), &raw)?;
                    frames.push(frame);
                }
                field = None;
            }
            Ok(Event::Eof) => {
                if current.is_some() {
                    return Err(MalformedTraceError::TruncatedFrame {
                        frame: frames.len(),
                    });
                }
                break;
            }
            Err(source) => {
                return Err(MalformedTraceError::Xml {
                    position: reader.buffer_position(),
                    source,
                });
            }
            _ => {}
        }
        buf.clear();
    }

    if frames.is_empty() {
        return Err(MalformedTraceError::Empty);
    }
    info!("loaded {} frames", frames.len());
    Ok(frames)
}

fn build_frame(
    frame: usize,
    raw: &HashMap<String, String>,
) -> Result<FrameRecord, MalformedTraceError> {
    let fields = FrameFields {
        positions: int_list(frame, raw, POSITIONS)?,
        tops: int_list(frame, raw, TOPS)?,
        bottoms: int_list(frame, raw, BOTTOMS)?,
        edges: int_list(frame, raw, EDGES)?,
        source: id(int(frame, raw, SOURCE)?),
        source_height: optional_int(frame, raw, SOURCE_HEIGHT)?,
        first_target: target(frame, raw, FIRST_TARGET, FIRST_GAP)?,
        second_target: target(frame, raw, SECOND_TARGET, SECOND_GAP)?,
        view_height: int(frame, raw, VIEW_HEIGHT)?,
        float_y: int(frame, raw, FLOAT_Y)?,
        touch_y: optional_int(frame, raw, TOUCH_Y)?,
    };

    let record = FrameRecord::new(fields).map_err(|violation| match violation {
        FrameInvariant::LengthMismatch {
            field,
            expected,
            found,
        } => MalformedTraceError::LengthMismatch {
            frame,
            field: label_for(field),
            expected,
            found,
        },
        FrameInvariant::DuplicateItem(id) => MalformedTraceError::DuplicateItem { frame, id },
    })?;

    for t in record.offscreen_targets() {
        warn!("frame {frame}: target {} is not among the visible items", t.id);
    }
    debug!(
        "frame {frame}: {} items, source {:?}",
        record.len(),
        record.source()
    );
    Ok(record)
}

fn label_for(field: &str) -> &'static str {
    match field {
        "tops" => TOPS,
        "bottoms" => BOTTOMS,
        "edges" => EDGES,
        _ => POSITIONS,
    }
}

/// Negative identifiers mean "none" in the trace.
fn id(value: i32) -> Option<ItemId> {
    (value >= 0).then_some(value)
}

fn target(
    frame: usize,
    raw: &HashMap<String, String>,
    id_field: &'static str,
    gap_field: &'static str,
) -> Result<Option<Target>, MalformedTraceError> {
    let target_id = int(frame, raw, id_field)?;
    let gap_height = int(frame, raw, gap_field)?;
    Ok(id(target_id).map(|id| Target { id, gap_height }))
}

fn int_list(
    frame: usize,
    raw: &HashMap<String, String>,
    field: &'static str,
) -> Result<Vec<i32>, MalformedTraceError> {
    let text = raw
        .get(field)
        .ok_or(MalformedTraceError::MissingField { frame, field })?;
    parse_int_list(text).map_err(|value| MalformedTraceError::InvalidInteger {
        frame,
        field,
        value,
    })
}

fn int(
    frame: usize,
    raw: &HashMap<String, String>,
    field: &'static str,
) -> Result<i32, MalformedTraceError> {
    optional_int(frame, raw, field)?.ok_or(MalformedTraceError::MissingField { frame, field })
}

fn optional_int(
    frame: usize,
    raw: &HashMap<String, String>,
    field: &'static str,
) -> Result<Option<i32>, MalformedTraceError> {
    let Some(text) = raw.get(field) else {
        return Ok(None);
    };
    let text = text.trim();
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| MalformedTraceError::InvalidInteger {
            frame,
            field,
            value: text.to_string(),
        })
}
