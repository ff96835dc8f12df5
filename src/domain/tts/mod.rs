pub mod delivery;
pub mod dto;
pub mod error;
pub mod language;
pub mod service;
pub mod speed;

pub use dto::{LanguagesResponse, SpeedRange, SynthesizeResponse, TtsRequest};
pub use error::TtsServiceError;
pub use language::{
    LanguageCode, LanguageOption, LanguageSelection, LanguageTable, SelectionResolver,
    UnsupportedSelection,
};
pub use service::{SynthesisCommand, TtsService, TtsServiceApi, TtsSynthesisResult};
