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

#[derive(Debug, thiserror::Error)]
pub enum JsonEngineError {
    #[error("JsonEngineError::Json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JsonEngineError::Io: failed to access message body: {0}")]
    Io(#[from] std::io::Error),
    #[error("JsonEngineError::UnsupportedType: '{0}' is not registered with the engine")]
    UnsupportedType(&'static str),
    #[error("JsonEngineError::BodyTooLarge: message body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },
}
