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

use std::collections::HashMap;

pub mod builder;

pub use builder::{JsonEngineConfigBuilder, JsonEngineConfigError, MAX_BODY_BYTES, PRETTY_PRINT, REGISTERED_TYPES_ONLY};

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct JsonEngineConfig {
    pretty_print: bool,
    registered_types_only: bool,
    max_body_bytes: Option<u64>,
}

impl JsonEngineConfig {
    pub fn builder() -> JsonEngineConfigBuilder {
        JsonEngineConfigBuilder::new()
    }

    pub fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    /// When set, only types registered with the engine are reported as
    /// (de)serializable.
    pub fn registered_types_only(&self) -> bool {
        self.registered_types_only
    }

    pub fn max_body_bytes(&self) -> Option<u64> {
        self.max_body_bytes
    }
}

impl TryFrom<&HashMap<String, String>> for JsonEngineConfig {
    type Error = JsonEngineConfigError;

    fn try_from(config_map: &HashMap<String, String>) -> Result<Self, Self::Error> {
        JsonEngineConfigBuilder::from(config_map).build()
    }
}
