use base64::Engine;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Media type assumed for payloads that are bare base64 rather than data URIs.
const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// Ordered mapping from chart key (`chart_1`, `chart_2`, ...) to image payload.
///
/// A `Charts` value always holds at least one entry; responses without charts carry
/// `None` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charts {
    entries: Vec<(String, String)>,
}

impl Charts {
    /// Keys the payloads by their 1-based position.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_payloads<I>(payloads: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let entries: Vec<(String, String)> = payloads
            .into_iter()
            .enumerate()
            .map(|(index, payload)| (format!("chart_{}", index + 1), payload))
            .collect();
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    /// Looks up a payload by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of charts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no charts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, payload)` pairs in chart order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates decoded views over every chart.
    pub fn images(&self) -> impl Iterator<Item = ChartImage<'_>> {
        self.iter()
            .map(|(key, payload)| ChartImage { key, payload })
    }
}

impl Serialize for Charts {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, payload) in &self.entries {
            map.serialize_entry(key, payload)?;
        }
        map.end()
    }
}

/// A chart payload paired with its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartImage<'a> {
    /// The chart key, e.g. `chart_1`.
    pub key: &'a str,
    /// The raw payload as received, normally `data:image/png;base64,...`.
    pub payload: &'a str,
}

/// A chart decoded into bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedChart {
    /// Media type from the data URI.
    pub media_type: String,
    /// Image bytes.
    pub data: Vec<u8>,
}

impl DecodedChart {
    /// File extension matching the media type.
    pub fn extension(&self) -> &str {
        match self.media_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/svg+xml" => "svg",
            _ => "bin",
        }
    }
}

impl ChartImage<'_> {
    /// Decodes the payload.
    ///
    /// Accepts `data:<mime>;base64,<data>` URIs and bare base64 (treated as PNG).  The
    /// backend sends an empty string for charts it failed to draw; those decode to an
    /// encoding error.
    pub fn decode(&self) -> Result<DecodedChart> {
        let payload = self.payload.trim();
        if payload.is_empty() {
            return Err(Error::encoding(
                format!("{} has an empty payload", self.key),
                None,
            ));
        }
        let (media_type, encoded) = match payload.strip_prefix("data:") {
            Some(rest) => {
                let Some((header, data)) = rest.split_once(',') else {
                    return Err(Error::encoding(
                        format!("{} is a data URI without a comma", self.key),
                        None,
                    ));
                };
                let Some(media_type) = header.strip_suffix(";base64") else {
                    return Err(Error::encoding(
                        format!("{} is not base64 encoded", self.key),
                        None,
                    ));
                };
                let media_type = if media_type.is_empty() {
                    DEFAULT_MEDIA_TYPE
                } else {
                    media_type
                };
                (media_type, data)
            }
            None => (DEFAULT_MEDIA_TYPE, payload),
        };
        let data = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|err| {
                Error::encoding(
                    format!("{} has invalid base64: {err}", self.key),
                    Some(Box::new(err)),
                )
            })?;
        Ok(DecodedChart {
            media_type: media_type.to_string(),
            data,
        })
    }
}
