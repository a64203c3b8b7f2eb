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

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    engine::TypeDescriptor,
    error::{MessageNotReadable, MessageNotWritable},
    media_type::MediaType,
    message::{HttpInputMessage, HttpOutputMessage},
};

pub mod json;

pub use json::JsonMessageConverter;

/// Converts HTTP message bodies to and from typed values.
///
/// The capability queries are side-effect free and are expected to be
/// consulted before `read` or `write` is dispatched.
pub trait MessageConverter {
    fn supported_media_types(&self) -> &[MediaType];

    fn can_read(&self, ty: &TypeDescriptor, media_type: Option<&MediaType>) -> bool;

    fn can_write(&self, ty: &TypeDescriptor, media_type: Option<&MediaType>) -> bool;

    fn read<T, M>(&self, input: &mut M) -> Result<T, MessageNotReadable>
    where
        T: DeserializeOwned + 'static,
        M: HttpInputMessage;

    /// Writes `value` to the output body. `content_type` is the negotiated
    /// media type, if any, and is used for the `Content-Type` header when
    /// the message does not carry one yet.
    fn write<T, M>(
        &self,
        value: &T,
        declared: Option<&TypeDescriptor>,
        content_type: Option<&MediaType>,
        output: &mut M,
    ) -> Result<(), MessageNotWritable>
    where
        T: Serialize + ?Sized + 'static,
        M: HttpOutputMessage;

    fn default_content_type<T: ?Sized>(&self, value: Option<&T>) -> MediaType;

    /// `None` means the request declared no content type, which is readable.
    fn can_read_media_type(&self, media_type: Option<&MediaType>) -> bool {
        match media_type {
            None => true,
            Some(media_type) => self
                .supported_media_types()
                .iter()
                .any(|supported| supported.includes(media_type)),
        }
    }

    fn can_write_media_type(&self, media_type: Option<&MediaType>) -> bool {
        match media_type {
            None => true,
            Some(media_type) if media_type.is_wildcard_type() => true,
            Some(media_type) => self
                .supported_media_types()
                .iter()
                .any(|supported| supported.is_compatible_with(media_type)),
        }
    }
}
