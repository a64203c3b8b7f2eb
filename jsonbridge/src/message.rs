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

use bytes::{
    buf::{Reader, Writer},
    Buf, BufMut, Bytes, BytesMut,
};
use headers::{ContentType, HeaderMapExt};
use http::HeaderMap;

use crate::media_type::MediaType;

/// Headers shared by request and response messages.
pub trait HttpMessage {
    fn headers(&self) -> &HeaderMap;

    /// The parsed `Content-Type` header, if present and valid.
    fn content_type(&self) -> Option<MediaType> {
        self.headers()
            .typed_get::<ContentType>()
            .map(|content_type| MediaType::from(mime::Mime::from(content_type)))
    }
}

/// An incoming message whose body a converter reads from.
pub trait HttpInputMessage: HttpMessage {
    type Body: Read;

    fn body(&mut self) -> &mut Self::Body;
}

/// An outgoing message whose body a converter writes to.
pub trait HttpOutputMessage: HttpMessage {
    type Body: Write;

    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn body(&mut self) -> &mut Self::Body;
}

#[derive(Debug)]
pub struct InputMessage<R> {
    headers: HeaderMap,
    body: R,
}

impl<R: Read> InputMessage<R> {
    pub fn new(headers: HeaderMap, body: R) -> Self {
        Self { headers, body }
    }

    pub fn from_reader(body: R) -> Self {
        Self::new(HeaderMap::new(), body)
    }

    pub fn into_body(self) -> R {
        self.body
    }
}

impl InputMessage<Reader<Bytes>> {
    pub fn from_bytes(body: impl Into<Bytes>) -> Self {
        Self::from_reader(body.into().reader())
    }
}

impl<R: Read> HttpMessage for InputMessage<R> {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<R: Read> HttpInputMessage for InputMessage<R> {
    type Body = R;

    fn body(&mut self) -> &mut Self::Body {
        &mut self.body
    }
}

#[derive(Debug)]
pub struct OutputMessage<W> {
    headers: HeaderMap,
    body: W,
}

impl<W: Write> OutputMessage<W> {
    pub fn new(headers: HeaderMap, body: W) -> Self {
        Self { headers, body }
    }

    pub fn from_writer(body: W) -> Self {
        Self::new(HeaderMap::new(), body)
    }

    pub fn into_parts(self) -> (HeaderMap, W) {
        (self.headers, self.body)
    }
}

impl OutputMessage<Writer<BytesMut>> {
    /// An output message buffering its body in memory.
    pub fn in_memory() -> Self {
        Self::from_writer(BytesMut::new().writer())
    }

    pub fn body_bytes(&self) -> &[u8] {
        self.body.get_ref()
    }

    pub fn into_body_bytes(self) -> Bytes {
        self.body.into_inner().freeze()
    }
}

impl<W: Write> HttpMessage for OutputMessage<W> {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<W: Write> HttpOutputMessage for OutputMessage<W> {
    type Body = W;

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn body(&mut self) -> &mut Self::Body {
        &mut self.body
    }
}
