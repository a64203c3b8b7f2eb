/*
 * Copyright 2024 Thaddeus Treloar
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::io::{Read, Write};

use dashmap::DashSet;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{JsonEngine, JsonEngineConfig, JsonEngineError, TypeDescriptor};

/// The default [`JsonEngine`], backed by `serde_json`.
///
/// Types can be registered at any time, including while the engine is
/// shared between converters. Registration only matters when the config
/// has `registered_types_only` set.
#[derive(Debug, Default)]
pub struct SerdeJsonEngine {
    config: JsonEngineConfig,
    serializable: DashSet<TypeDescriptor>,
    deserializable: DashSet<TypeDescriptor>,
}

impl SerdeJsonEngine {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    pub fn with_config(config: JsonEngineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &JsonEngineConfig {
        &self.config
    }

    pub fn register<T>(&self) -> &Self
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        self.register_serialize::<T>().register_deserialize::<T>()
    }

    pub fn register_serialize<T>(&self) -> &Self
    where
        T: Serialize + ?Sized + 'static,
    {
        self.serializable.insert(TypeDescriptor::of::<T>());

        self
    }

    pub fn register_deserialize<T>(&self) -> &Self
    where
        T: DeserializeOwned + 'static,
    {
        self.deserializable.insert(TypeDescriptor::of::<T>());

        self
    }

    fn read_body<R: Read>(&self, mut reader: R) -> Result<Vec<u8>, JsonEngineError> {
        let mut buffer = Vec::new();

        match self.config.max_body_bytes() {
            Some(limit) => {
                reader.take(limit.saturating_add(1)).read_to_end(&mut buffer)?;

                if buffer.len() as u64 > limit {
                    return Err(JsonEngineError::BodyTooLarge { limit });
                }
            }
            None => {
                reader.read_to_end(&mut buffer)?;
            }
        }

        Ok(buffer)
    }
}

impl JsonEngine for SerdeJsonEngine {
    type Error = JsonEngineError;

    fn can_serialize(&self, ty: &TypeDescriptor) -> bool {
        !self.config.registered_types_only() || self.serializable.contains(ty)
    }

    fn can_deserialize(&self, ty: &TypeDescriptor) -> bool {
        !self.config.registered_types_only() || self.deserializable.contains(ty)
    }

    fn serialize<T, W>(
        &self,
        value: &T,
        declared: Option<&TypeDescriptor>,
        mut writer: W,
    ) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized + 'static,
        W: Write,
    {
        let ty = declared.copied().unwrap_or_else(TypeDescriptor::of::<T>);

        if !self.can_serialize(&ty) {
            debug!(type_name = ty.name(), "Refusing to serialize unregistered type.");
            return Err(JsonEngineError::UnsupportedType(ty.name()));
        }

        // Render fully before touching the writer so a failure leaves it untouched.
        let buffer = if self.config.pretty_print() {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };

        writer.write_all(&buffer)?;

        Ok(())
    }

    fn deserialize<T, R>(&self, reader: R) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + 'static,
        R: Read,
    {
        let ty = TypeDescriptor::of::<T>();

        if !self.can_deserialize(&ty) {
            debug!(type_name = ty.name(), "Refusing to deserialize unregistered type.");
            return Err(JsonEngineError::UnsupportedType(ty.name()));
        }

        let buffer = self.read_body(reader)?;

        Ok(serde_json::from_slice(&buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::engine::config::{JsonEngineConfigBuilder, MAX_BODY_BYTES, PRETTY_PRINT, REGISTERED_TYPES_ONLY};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn engine_with(key: &str, value: &str) -> SerdeJsonEngine {
        let mut builder = JsonEngineConfigBuilder::new();
        builder.set(key, value);

        SerdeJsonEngine::with_config(builder.build().unwrap())
    }

    #[test]
    fn test_permissive_engine_accepts_any_type() {
        let engine = SerdeJsonEngine::new();

        assert!(engine.can_serialize(&TypeDescriptor::of::<Point>()));
        assert!(engine.can_deserialize(&TypeDescriptor::of::<Vec<String>>()));
    }

    #[test]
    fn test_strict_engine_requires_registration() {
        let engine = engine_with(REGISTERED_TYPES_ONLY, "true");
        let point = TypeDescriptor::of::<Point>();

        assert!(!engine.can_serialize(&point));
        assert!(!engine.can_deserialize(&point));

        engine.register_serialize::<Point>();

        assert!(engine.can_serialize(&point));
        assert!(!engine.can_deserialize(&point));

        engine.register::<Point>();

        assert!(engine.can_deserialize(&point));
    }

    #[test]
    fn test_strict_engine_rejects_unregistered_value() {
        let engine = engine_with(REGISTERED_TYPES_ONLY, "true");
        let mut out = Vec::new();

        let result = engine.serialize(&Point { x: 1, y: 2 }, None, &mut out);

        assert!(matches!(result, Err(JsonEngineError::UnsupportedType(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_declared_type_drives_capability() {
        let engine = engine_with(REGISTERED_TYPES_ONLY, "true");
        engine.register_serialize::<Point>();

        let mut out = Vec::new();
        let value = serde_json::json!({ "x": 1, "y": 2 });

        engine
            .serialize(&value, Some(&TypeDescriptor::of::<Point>()), &mut out)
            .unwrap();

        assert_eq!(out, br#"{"x":1,"y":2}"#);
    }

    #[test]
    fn test_pretty_print() {
        let engine = engine_with(PRETTY_PRINT, "true");
        let mut out = Vec::new();

        engine.serialize(&Point { x: 1, y: 2 }, None, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"x\": 1,\n  \"y\": 2\n}");
    }

    #[test]
    fn test_body_limit() {
        let engine = engine_with(MAX_BODY_BYTES, "8");

        let within: Vec<u8> = engine.deserialize(&b"[1,2,3]"[..]).unwrap();
        assert_eq!(within, vec![1, 2, 3]);

        let result = engine.deserialize::<Vec<u8>, _>(&b"[1,2,3,4,5]"[..]);
        assert!(matches!(result, Err(JsonEngineError::BodyTooLarge { limit: 8 })));
    }

    #[test]
    fn test_trailing_characters_are_rejected() {
        let engine = SerdeJsonEngine::new();

        let result = engine.deserialize::<Point, _>(&br#"{"x":1,"y":2} junk"#[..]);

        assert!(matches!(result, Err(JsonEngineError::Json(_))));
    }
}
