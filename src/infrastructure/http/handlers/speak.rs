//! Synthesize Handler - POST /synthesize

use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use crate::application::{SpeakCommand, SpeakOutcome};
use crate::infrastructure::http::dto::{
    AnnouncementCached, AnnouncementParts, AnnouncementResponse, SynthesizeRequest,
    SynthesizeResponse, TextSynthesisResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::http::urls::base_url_from_headers;

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, ApiError> {
    let base_url = base_url_from_headers(&headers, &state.fallback_base_url);

    let command = SpeakCommand {
        text: req.text,
        language: req.language,
        reference_file: req.reference_file,
        speaker: req.speaker,
        speed: req.speed,
        force_refresh: req.force_refresh,
        ticket: req.ticket,
        counter: req.counter,
    };

    let outcome = state.speak_handler.handle(command).await?;

    let response = match outcome {
        SpeakOutcome::Text(out) => SynthesizeResponse::Text(TextSynthesisResponse {
            status: "ok",
            kind: "text",
            url: state.url_mapper.to_url(&base_url, &out.artifact_path),
            cache_file: out.artifact_path.to_string_lossy().to_string(),
            text: out.text,
            language: out.language,
            speaker: out.speaker,
            reference_file: out.reference_file,
            speed: out.speed,
            cache_key: out.cache_key,
            cached: out.cached,
            hits: out.hits,
        }),
        SpeakOutcome::Announcement(out) => {
            SynthesizeResponse::Announcement(AnnouncementResponse {
                status: "ok",
                kind: "announcement",
                urls: AnnouncementParts {
                    ticket: state.url_mapper.to_url(&base_url, &out.ticket_path),
                    counter: state.url_mapper.to_url(&base_url, &out.counter_path),
                },
                files: AnnouncementParts {
                    ticket: out.ticket_path.to_string_lossy().to_string(),
                    counter: out.counter_path.to_string_lossy().to_string(),
                },
                cached: AnnouncementCached {
                    ticket: out.ticket_cached,
                    counter: out.counter_cached,
                },
                ticket: out.ticket,
                counter: out.counter,
                language: out.language,
                speaker: out.speaker,
                speed: out.speed,
            })
        }
    };

    Ok(Json(response))
}
