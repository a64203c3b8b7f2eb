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

use std::{
    any::TypeId,
    error::Error,
    fmt::Display,
    io::{Read, Write},
};

use serde::{de::DeserializeOwned, Serialize};

pub mod config;
pub mod error;
pub mod json;

pub use config::{JsonEngineConfig, JsonEngineConfigBuilder};
pub use error::JsonEngineError;
pub use json::SerdeJsonEngine;

/// Runtime identity of a type, handed to an engine's capability queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A JSON serialization engine a converter delegates body bytes to.
///
/// Engines may be shared between converters and threads, and must not
/// rely on being called from any particular one.
pub trait JsonEngine: Send + Sync {
    type Error: Error + Send + Sync + 'static;

    fn can_serialize(&self, ty: &TypeDescriptor) -> bool;

    fn can_deserialize(&self, ty: &TypeDescriptor) -> bool;

    /// Writes `value` to `writer`. `declared` overrides the runtime type
    /// for capability checks when the caller knows a more specific one.
    fn serialize<T, W>(
        &self,
        value: &T,
        declared: Option<&TypeDescriptor>,
        writer: W,
    ) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized + 'static,
        W: Write;

    fn deserialize<T, R>(&self, reader: R) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + 'static,
        R: Read;
}
