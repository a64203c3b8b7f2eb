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

use std::{collections::HashMap, str::FromStr};

use tracing::warn;

use super::JsonEngineConfig;

pub const PRETTY_PRINT: &str = "json.pretty.print";
pub const REGISTERED_TYPES_ONLY: &str = "json.registered.types.only";
pub const MAX_BODY_BYTES: &str = "json.max.body.bytes";

const KNOWN_FIELDS: [&str; 3] = [PRETTY_PRINT, REGISTERED_TYPES_ONLY, MAX_BODY_BYTES];

const DEFAULT_FIELDS: [(&str, &str); 2] = [
    (PRETTY_PRINT, "false"),
    (REGISTERED_TYPES_ONLY, "false"),
];

#[derive(Debug, Clone, Default, derive_more::From)]
pub struct JsonEngineConfigBuilder {
    pub(crate) config_map: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum JsonEngineConfigError {
    #[error("JsonEngineConfigError::InvalidValue: '{value}' is not a valid value for '{key}'")]
    InvalidValue { key: &'static str, value: String },
}

impl JsonEngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.config_map.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.config_map.get(key).map(String::as_str)
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.config_map.insert(key.into(), value.into());

        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.config_map.remove(key);

        self
    }

    fn clean_config(mut self) -> Self {
        self.config_map.retain(|key, _| {
            let known = KNOWN_FIELDS.contains(&key.as_str());

            if !known {
                warn!("Unknown key '{}' in json engine config. Ignoring.", key);
            }

            known
        });

        self
    }

    fn set_missing_defaults(mut self) -> Self {
        DEFAULT_FIELDS.into_iter().for_each(|(key, value)| {
            self.config_map
                .entry(key.to_owned())
                .or_insert_with(|| value.to_owned());
        });

        self
    }

    fn parse_field<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, JsonEngineConfigError> {
        self.get(key)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|_| JsonEngineConfigError::InvalidValue {
                        key,
                        value: value.to_owned(),
                    })
            })
            .transpose()
    }

    pub fn build(self) -> Result<JsonEngineConfig, JsonEngineConfigError> {
        let builder = self.clean_config().set_missing_defaults();

        Ok(JsonEngineConfig {
            pretty_print: builder.parse_field(PRETTY_PRINT)?.unwrap_or_default(),
            registered_types_only: builder
                .parse_field(REGISTERED_TYPES_ONLY)?
                .unwrap_or_default(),
            max_body_bytes: builder.parse_field(MAX_BODY_BYTES)?,
        })
    }
}

impl From<&HashMap<String, String>> for JsonEngineConfigBuilder {
    fn from(config_map: &HashMap<String, String>) -> Self {
        Self {
            config_map: config_map.clone(),
        }
    }
}
