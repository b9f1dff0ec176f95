//! Message types for the companion link
//!
//! Message types are divided into two directions:
//! - Watch → Companion: weather refresh trigger (a single marker key)
//! - Companion → Watch: weather batch (temperature and/or conditions)

use core::fmt::Write;

use heapless::{String, Vec};

use crate::dict::{DictError, DictReader, DictWriter, Tuple, TupleType, DICT_HEADER_SIZE, TUPLE_HEADER_SIZE};
use crate::text::truncated;

// Keys: Watch → Companion
pub const KEY_TRIGGER: u32 = 0;

// Keys: Companion → Watch
pub const KEY_TEMPERATURE: u32 = 0;
pub const KEY_CONDITIONS: u32 = 1;

/// Capacity of a rendered temperature ("-40C")
pub const TEMPERATURE_TEXT_CAPACITY: usize = 8;

/// Capacity of the conditions text (31 bytes plus the wire NUL)
pub const CONDITIONS_CAPACITY: usize = 31;

/// Encoded size of a trigger message
pub const TRIGGER_MESSAGE_SIZE: usize = DICT_HEADER_SIZE + TUPLE_HEADER_SIZE + 1;

/// Largest weather batch the companion is expected to send
pub const MAX_WEATHER_MESSAGE_SIZE: usize =
    DICT_HEADER_SIZE + 2 * TUPLE_HEADER_SIZE + 4 + CONDITIONS_CAPACITY + 1;

/// Rendered temperature text
pub type TemperatureText = String<TEMPERATURE_TEXT_CAPACITY>;

/// Conditions text
pub type ConditionsText = String<CONDITIONS_CAPACITY>;

/// Identifier of a weather refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RequestId(pub u16);

impl RequestId {
    /// The identifier following this one (wraps around)
    pub const fn next(self) -> Self {
        RequestId(self.0.wrapping_add(1))
    }
}

/// An encoded weather refresh trigger
///
/// The request id is local bookkeeping only; the wire message carries just
/// the marker key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutboundRequest {
    id: RequestId,
    bytes: [u8; TRIGGER_MESSAGE_SIZE],
}

impl OutboundRequest {
    /// Request identifier
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Encoded dictionary bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encode a weather refresh trigger: `{KEY_TRIGGER: uint8 0}`
pub const fn encode_trigger(id: RequestId) -> OutboundRequest {
    let key = KEY_TRIGGER.to_le_bytes();
    OutboundRequest {
        id,
        bytes: [
            1, // count
            key[0],
            key[1],
            key[2],
            key[3],
            TupleType::Uint.to_byte(),
            1, // length (le)
            0,
            0, // value
        ],
    }
}

/// A decoded weather value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherField {
    /// Temperature in whole degrees Celsius
    Temperature(i32),
    /// Short description of current conditions
    Conditions(ConditionsText),
}

/// Reasons a single field could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldError {
    /// Value has the wrong tuple type for its key
    WrongType(TupleType),
    /// Integer value has an unsupported width or range
    WrongWidth,
    /// Temperature does not fit the rendered text buffer
    OutOfRange(i32),
    /// Text is not valid UTF-8
    InvalidText,
}

/// Outcome of decoding one dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodedEntry {
    /// A recognized weather value
    Field(WeatherField),
    /// Key not part of the weather protocol; skipped
    UnknownKey(u32),
    /// Recognized key with an unusable value; skipped
    Invalid { key: u32, error: FieldError },
    /// Dictionary structure broken; no further entries follow
    Malformed(DictError),
}

/// Render a temperature as `"<value>C"`
pub fn temperature_text(celsius: i32) -> Result<TemperatureText, FieldError> {
    let mut text = TemperatureText::new();
    write!(text, "{}C", celsius).map_err(|_| FieldError::OutOfRange(celsius))?;
    Ok(text)
}

/// Decode one tuple by key
pub fn decode_tuple(tuple: &Tuple<'_>) -> DecodedEntry {
    match tuple.key {
        KEY_TEMPERATURE => match decode_temperature(tuple) {
            Ok(celsius) => DecodedEntry::Field(WeatherField::Temperature(celsius)),
            Err(error) => DecodedEntry::Invalid {
                key: tuple.key,
                error,
            },
        },
        KEY_CONDITIONS => match decode_conditions(tuple) {
            Ok(text) => DecodedEntry::Field(WeatherField::Conditions(text)),
            Err(error) => DecodedEntry::Invalid {
                key: tuple.key,
                error,
            },
        },
        key => DecodedEntry::UnknownKey(key),
    }
}

fn decode_temperature(tuple: &Tuple<'_>) -> Result<i32, FieldError> {
    if !matches!(tuple.tuple_type, TupleType::Int | TupleType::Uint) {
        return Err(FieldError::WrongType(tuple.tuple_type));
    }
    let celsius = tuple.as_i32().ok_or(FieldError::WrongWidth)?;
    // Reject anything the display could not show
    temperature_text(celsius)?;
    Ok(celsius)
}

fn decode_conditions(tuple: &Tuple<'_>) -> Result<ConditionsText, FieldError> {
    let bytes = tuple
        .as_cstr()
        .ok_or(FieldError::WrongType(tuple.tuple_type))?;
    let text = core::str::from_utf8(bytes).map_err(|_| FieldError::InvalidText)?;
    // Over-long conditions are cut, not rejected
    Ok(truncated(text))
}

/// Lazily decoded weather batch
///
/// Entries are produced in wire order. Field-level problems are reported
/// per entry and never end the batch; only a structural error does.
#[derive(Debug, Clone)]
pub struct WeatherBatch<'a> {
    reader: Option<DictReader<'a>>,
    pending: Option<DictError>,
}

impl<'a> Iterator for WeatherBatch<'a> {
    type Item = DecodedEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending.take() {
            return Some(DecodedEntry::Malformed(error));
        }

        let item = self.reader.as_mut()?.next()?;
        Some(match item {
            Ok(tuple) => decode_tuple(&tuple),
            Err(error) => DecodedEntry::Malformed(error),
        })
    }
}

/// Decode an inbound weather batch
pub fn decode_batch(raw: &[u8]) -> WeatherBatch<'_> {
    match DictReader::new(raw) {
        Ok(reader) => WeatherBatch {
            reader: Some(reader),
            pending: None,
        },
        Err(error) => WeatherBatch {
            reader: None,
            pending: Some(error),
        },
    }
}

/// Encode a weather batch as the companion sends it (for testing or simulation)
pub fn encode_weather(
    temperature: Option<i32>,
    conditions: Option<&str>,
) -> Result<Vec<u8, MAX_WEATHER_MESSAGE_SIZE>, DictError> {
    let mut writer = DictWriter::<MAX_WEATHER_MESSAGE_SIZE>::new()?;
    if let Some(celsius) = temperature {
        writer.write_int32(KEY_TEMPERATURE, celsius)?;
    }
    if let Some(text) = conditions {
        let text: ConditionsText = truncated(text);
        writer.write_cstring(KEY_CONDITIONS, &text)?;
    }
    Ok(writer.finish())
}

/// Convert a temperature in hundredths of a kelvin to whole degrees Celsius
///
/// Rounds half up: 273.65 K is 1 °C, 272.65 K is 0 °C.
pub fn kelvin_to_celsius(kelvin_x100: i32) -> i32 {
    (kelvin_x100.saturating_sub(27_315).saturating_add(50)).div_euclid(100)
}
