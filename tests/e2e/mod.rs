// End-to-end tests for the TTS Converter API
//
// Each test starts the full router on 127.0.0.1:0 with its own temporary
// audio directory. Synthesis goes either to an in-process stub repository
// or, for the Google client tests, to a local mock of the translate_tts
// endpoint, so no test needs network access.

mod test_audio;
mod test_google_tts;
mod test_languages;
