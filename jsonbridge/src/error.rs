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

use std::error::Error;

use crate::engine::TypeDescriptor;

type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// The body could not be converted into the requested type.
#[derive(Debug, thiserror::Error)]
#[error("Message not readable as '{type_name}': {source}")]
pub struct MessageNotReadable {
    type_name: &'static str,
    #[source]
    source: BoxedError,
}

impl MessageNotReadable {
    pub(crate) fn new(ty: TypeDescriptor, source: impl Into<BoxedError>) -> Self {
        Self {
            type_name: ty.name(),
            source: source.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn into_source(self) -> BoxedError {
        self.source
    }
}

/// The value could not be written to the body.
#[derive(Debug, thiserror::Error)]
#[error("Message not writable as '{type_name}': {source}")]
pub struct MessageNotWritable {
    type_name: &'static str,
    #[source]
    source: BoxedError,
}

impl MessageNotWritable {
    pub(crate) fn new(ty: TypeDescriptor, source: impl Into<BoxedError>) -> Self {
        Self {
            type_name: ty.name(),
            source: source.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn into_source(self) -> BoxedError {
        self.source
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    NotReadable(#[from] MessageNotReadable),
    #[error(transparent)]
    NotWritable(#[from] MessageNotWritable),
}

impl ConversionError {
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::NotReadable(_))
    }

    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::NotWritable(_))
    }
}
