//! Companion Link Protocol
//!
//! This crate defines the key/value dictionary protocol between the watch
//! face and its paired companion. The watch sends a one-key trigger; the
//! companion answers with a weather batch whenever it has fresh data.
//!
//! # Protocol Overview
//!
//! All messages are encoded dictionaries:
//! ```text
//! ┌───────┬──────────────────────────────────────────────┐
//! │ COUNT │ TUPLE × COUNT                                │
//! │ 1B    │ KEY 4B │ TYPE 1B │ LENGTH 2B │ VALUE 0–65535B │
//! └───────┴──────────────────────────────────────────────┘
//! ```
//!
//! The transport may reorder tuples within a batch or deliver partial
//! batches. Decoding is per tuple: an unusable value or an unknown key
//! never discards the rest of the batch.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod dict;
pub mod messages;
pub mod text;

pub use dict::{DictError, DictReader, DictWriter, Tuple, TupleType};
pub use messages::{
    decode_batch, encode_trigger, encode_weather, kelvin_to_celsius, temperature_text,
    ConditionsText, DecodedEntry, FieldError, OutboundRequest, RequestId, TemperatureText,
    WeatherBatch, WeatherField, CONDITIONS_CAPACITY, KEY_CONDITIONS, KEY_TEMPERATURE,
    KEY_TRIGGER, MAX_WEATHER_MESSAGE_SIZE, TEMPERATURE_TEXT_CAPACITY,
};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..96)) {
            let mut entries = 0usize;
            let mut malformed = 0usize;
            for entry in decode_batch(&bytes) {
                entries += 1;
                if matches!(entry, DecodedEntry::Malformed(_)) {
                    malformed += 1;
                }
            }
            // At most COUNT tuples plus one structural error
            let count = bytes.first().copied().unwrap_or(0) as usize;
            prop_assert!(entries <= count + 1);
            prop_assert!(malformed <= 1);
        }

        #[test]
        fn companion_batch_decodes_to_same_weather(
            celsius in -999_999i32..9_999_999,
            conditions in "[A-Za-z ]{0,31}",
        ) {
            let bytes = encode_weather(Some(celsius), Some(&conditions)).unwrap();
            let entries: heapless::Vec<DecodedEntry, 2> = decode_batch(&bytes).collect();
            prop_assert_eq!(&entries[0], &DecodedEntry::Field(WeatherField::Temperature(celsius)));
            match &entries[1] {
                DecodedEntry::Field(WeatherField::Conditions(text)) => {
                    prop_assert_eq!(text.as_str(), conditions.as_str())
                }
                other => prop_assert!(false, "unexpected entry: {:?}", other),
            }
        }
    }
}
