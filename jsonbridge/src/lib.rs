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

pub mod converter;
pub mod engine;
pub mod error;
pub mod init;
pub mod media_type;
pub mod message;

pub use converter::{JsonMessageConverter, MessageConverter};
pub use engine::{JsonEngine, SerdeJsonEngine, TypeDescriptor};
pub use error::{ConversionError, MessageNotReadable, MessageNotWritable};
pub use media_type::{MediaType, APPLICATION_JSON};
