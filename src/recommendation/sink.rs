use std::io::Write;

use thiserror::Error;

use crate::recommendation::types::RecommendationInstance;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for a finished recommendation list.
pub trait RecommendationSink {
    fn render(&mut self, recommendations: &[RecommendationInstance]) -> Result<(), SinkError>;
}

/// Writes the list as pretty-printed JSON followed by a newline.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes any serializable value in the same format.
    pub fn write_value<T: serde::Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> RecommendationSink for JsonSink<W> {
    fn render(&mut self, recommendations: &[RecommendationInstance]) -> Result<(), SinkError> {
        self.write_value(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::engine::default_recommendations;

    #[test]
    fn renders_pretty_json_array() {
        let mut sink = JsonSink::new(Vec::new());
        sink.render(&default_recommendations()).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with("[\n"));
        assert!(out.ends_with("]\n"));

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["title"], "Study Skills Assessment");
        assert_eq!(parsed[0]["type"], "assessment");
        assert_eq!(parsed[0]["priority"], "high");
        assert!(parsed[0].get("adaptiveSchedule").is_none());
    }

    #[test]
    fn empty_list_renders_empty_array() {
        let mut sink = JsonSink::new(Vec::new());
        sink.render(&[]).unwrap();
        assert_eq!(sink.into_inner(), b"[]\n");
    }
}
