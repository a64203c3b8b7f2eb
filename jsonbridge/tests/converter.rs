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
    collections::HashMap,
    io::{self, Write},
    sync::Arc,
};

use http::{header::CONTENT_TYPE, HeaderMap, HeaderValue};
use jsonbridge::{
    engine::{config::REGISTERED_TYPES_ONLY, JsonEngineConfig, JsonEngineError},
    message::{HttpMessage, InputMessage, OutputMessage},
    ConversionError, JsonMessageConverter, MediaType, MessageConverter, SerdeJsonEngine,
    TypeDescriptor, APPLICATION_JSON,
};
use serde::{ser::Error as _, Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Foo {
    id: u64,
    tags: Vec<String>,
    parent: Option<Box<Foo>>,
}

fn foo() -> Foo {
    Foo {
        id: 7,
        tags: vec!["a".to_owned(), "b".to_owned()],
        parent: Some(Box::new(Foo {
            id: 1,
            tags: vec![],
            parent: None,
        })),
    }
}

/// Always fails to serialize, as an engine would on a cyclic graph.
struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("cyclic object graph"))
    }
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn json_converter() -> JsonMessageConverter<SerdeJsonEngine> {
    JsonMessageConverter::new(Arc::new(SerdeJsonEngine::new()))
}

fn strict_converter() -> JsonMessageConverter<SerdeJsonEngine> {
    let config_map = HashMap::from([(REGISTERED_TYPES_ONLY.to_owned(), "true".to_owned())]);
    let config = JsonEngineConfig::try_from(&config_map).unwrap();

    JsonMessageConverter::new(Arc::new(SerdeJsonEngine::with_config(config)))
}

fn media(input: &str) -> MediaType {
    MediaType::parse(input).unwrap()
}

#[test]
fn test_can_read_only_json() {
    let converter = json_converter();
    let ty = TypeDescriptor::of::<Foo>();

    assert!(converter.can_read(&ty, Some(&APPLICATION_JSON)));
    assert!(!converter.can_read(&ty, Some(&media("text/plain"))));
    assert!(!converter.can_read(&ty, Some(&media("application/xml"))));
}

#[test]
fn test_can_write_only_json_compatible() {
    let converter = json_converter();
    let ty = TypeDescriptor::of::<Foo>();

    assert!(converter.can_write(&ty, Some(&APPLICATION_JSON)));
    assert!(converter.can_write(&ty, Some(&media("*/*"))));
    assert!(!converter.can_write(&ty, Some(&media("text/plain"))));
}

#[test]
fn test_default_content_type_is_json() {
    let converter = json_converter();

    assert_eq!(converter.default_content_type(Some(&foo())), APPLICATION_JSON);
    assert_eq!(converter.default_content_type(Some("text")), APPLICATION_JSON);
    assert_eq!(converter.default_content_type::<Foo>(None), APPLICATION_JSON);
}

#[test]
fn test_write_then_read_yields_equal_value() {
    let converter = json_converter();
    let mut output = OutputMessage::in_memory();

    converter.write(&foo(), None, None, &mut output).unwrap();

    assert_eq!(output.content_type(), Some(APPLICATION_JSON));

    let (headers, body) = output.into_parts();
    let bytes = body.into_inner().freeze();
    let mut input = InputMessage::new(headers, &bytes[..]);
    let read: Foo = converter.read(&mut input).unwrap();

    assert_eq!(read, foo());
}

#[test]
fn test_truncated_body_is_read_failure() {
    let converter = json_converter();
    let mut input = InputMessage::from_bytes(r#"{"id": 7, "tags": ["a""#);

    let error: ConversionError = converter.read::<Foo, _>(&mut input).unwrap_err().into();

    assert!(error.is_read_failure());
    assert!(!error.is_write_failure());
}

#[test]
fn test_empty_body_is_read_failure() {
    let converter = json_converter();
    let mut input = InputMessage::from_bytes("");

    assert!(converter.read::<Foo, _>(&mut input).is_err());
}

#[test]
fn test_unsupported_value_is_write_failure_without_output() {
    let converter = json_converter();
    let mut output = OutputMessage::in_memory();

    let error = converter
        .write(&Unserializable, None, None, &mut output)
        .unwrap_err();

    assert!(error.to_string().contains("cyclic object graph"));
    assert!(output.body_bytes().is_empty());

    let error: ConversionError = error.into();
    assert!(error.is_write_failure());
}

#[test]
fn test_io_error_is_write_failure() {
    let converter = json_converter();
    let mut output = OutputMessage::from_writer(BrokenPipe);

    let error = converter.write(&foo(), None, None, &mut output).unwrap_err();

    match error.into_source().downcast::<JsonEngineError>() {
        Ok(engine_error) => assert!(matches!(*engine_error, JsonEngineError::Io(_))),
        Err(other) => panic!("Unexpected source: {}", other),
    }
}

#[test]
fn test_existing_content_type_is_kept() {
    let converter = json_converter();
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"));
    let mut output = OutputMessage::new(headers, Vec::new());

    converter.write(&foo(), None, Some(&APPLICATION_JSON), &mut output).unwrap();

    assert_eq!(output.content_type(), Some(media("application/vnd.api+json")));
}

#[test]
fn test_strict_engine_rejects_unregistered_types() {
    let converter = strict_converter();
    let ty = TypeDescriptor::of::<Foo>();

    assert!(!converter.can_read(&ty, Some(&APPLICATION_JSON)));
    assert!(!converter.can_write(&ty, Some(&APPLICATION_JSON)));
    assert!(!converter.supports(&ty));

    let mut input = InputMessage::from_bytes(serde_json::to_vec(&foo()).unwrap());
    let error = converter.read::<Foo, _>(&mut input).unwrap_err();

    assert!(error.to_string().contains("not registered"));
}

#[test]
fn test_registration_is_visible_through_shared_engine() {
    let converter = strict_converter();
    let other = JsonMessageConverter::new(Arc::clone(converter.engine()));
    let ty = TypeDescriptor::of::<Foo>();

    converter.engine().register::<Foo>();

    assert!(other.can_read(&ty, Some(&APPLICATION_JSON)));
    assert!(other.can_write(&ty, None));
}

#[test]
fn test_converter_is_shareable_across_threads() {
    let converter = json_converter();

    let handles: Vec<_> = (0..4u64)
        .map(|id| {
            let converter = converter.clone();

            std::thread::spawn(move || {
                let value = Foo {
                    id,
                    tags: vec![],
                    parent: None,
                };
                let mut output = OutputMessage::in_memory();
                converter.write(&value, None, None, &mut output).unwrap();

                let mut input = InputMessage::from_bytes(output.into_body_bytes());
                let read: Foo = converter.read(&mut input).unwrap();

                assert_eq!(read, value);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
