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

use std::{io::Write, sync::Arc};

use headers::{ContentType, HeaderMapExt};
use http::header::CONTENT_TYPE;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace};

use super::MessageConverter;
use crate::{
    engine::{JsonEngine, TypeDescriptor},
    error::{MessageNotReadable, MessageNotWritable},
    media_type::{MediaType, APPLICATION_JSON},
    message::{HttpInputMessage, HttpOutputMessage},
};

/// Converts `application/json` bodies by delegating to a [`JsonEngine`].
///
/// The engine is shared; cloning the converter clones the handle, not the
/// engine.
#[derive(Debug)]
pub struct JsonMessageConverter<E> {
    engine: Arc<E>,
    supported_media_types: [MediaType; 1],
}

impl<E> Clone for JsonMessageConverter<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            supported_media_types: self.supported_media_types.clone(),
        }
    }
}

impl<E: JsonEngine> JsonMessageConverter<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            supported_media_types: [APPLICATION_JSON],
        }
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Media-type independent capability check.
    pub fn supports(&self, ty: &TypeDescriptor) -> bool {
        self.engine.can_serialize(ty)
    }

    fn add_default_headers<T, M>(&self, value: &T, content_type: Option<&MediaType>, output: &mut M)
    where
        T: ?Sized,
        M: HttpOutputMessage,
    {
        if output.headers().contains_key(CONTENT_TYPE) {
            return;
        }

        let content_type = match content_type {
            Some(content_type) if content_type.is_concrete() => content_type.clone(),
            _ => self.default_content_type(Some(value)),
        };

        output
            .headers_mut()
            .typed_insert(ContentType::from(content_type.into_mime()));
    }
}

impl<E: JsonEngine> MessageConverter for JsonMessageConverter<E> {
    fn supported_media_types(&self) -> &[MediaType] {
        &self.supported_media_types
    }

    fn can_read(&self, ty: &TypeDescriptor, media_type: Option<&MediaType>) -> bool {
        let readable = self.engine.can_deserialize(ty) && self.can_read_media_type(media_type);

        if !readable {
            debug!(
                type_name = ty.name(),
                media_type = ?media_type.map(ToString::to_string),
                "Cannot read type."
            );
        }

        readable
    }

    fn can_write(&self, ty: &TypeDescriptor, media_type: Option<&MediaType>) -> bool {
        let writable = self.engine.can_serialize(ty) && self.can_write_media_type(media_type);

        if !writable {
            debug!(
                type_name = ty.name(),
                media_type = ?media_type.map(ToString::to_string),
                "Cannot write type."
            );
        }

        writable
    }

    fn read<T, M>(&self, input: &mut M) -> Result<T, MessageNotReadable>
    where
        T: DeserializeOwned + 'static,
        M: HttpInputMessage,
    {
        let ty = TypeDescriptor::of::<T>();

        match self.engine.deserialize::<T, _>(input.body()) {
            Ok(value) => {
                trace!(type_name = ty.name(), "Read message body.");
                Ok(value)
            }
            Err(error) => {
                debug!(type_name = ty.name(), %error, "Failed to read message body.");
                Err(MessageNotReadable::new(ty, error))
            }
        }
    }

    fn write<T, M>(
        &self,
        value: &T,
        declared: Option<&TypeDescriptor>,
        content_type: Option<&MediaType>,
        output: &mut M,
    ) -> Result<(), MessageNotWritable>
    where
        T: Serialize + ?Sized + 'static,
        M: HttpOutputMessage,
    {
        let ty = declared.copied().unwrap_or_else(TypeDescriptor::of::<T>);

        self.add_default_headers(value, content_type, output);

        if let Err(error) = self.engine.serialize(value, declared, output.body()) {
            debug!(type_name = ty.name(), %error, "Failed to write message body.");
            return Err(MessageNotWritable::new(ty, error));
        }

        output.body().flush().map_err(|error| {
            debug!(type_name = ty.name(), %error, "Failed to flush message body.");
            MessageNotWritable::new(ty, error)
        })?;

        trace!(type_name = ty.name(), "Wrote message body.");

        Ok(())
    }

    fn default_content_type<T: ?Sized>(&self, _value: Option<&T>) -> MediaType {
        APPLICATION_JSON
    }
}
