//! Image ingestion: uploaded bytes become embedded encodings.
//!
//! An uploaded image is validated (format sniff plus a full decode, so a
//! truncated or corrupt file is rejected before anything touches the data
//! model) and embedded as a self-contained `data:<mime>;base64,<payload>`
//! string. The alternative input path, a plain external URL, passes through
//! [`accept_url`] untouched. No transcoding happens in either path.
//!
//! # Late completions
//!
//! Encoding runs on a background thread ([`spawn_encode`]) and may finish
//! after the submitting session was committed, cancelled, or superseded.
//! Every request carries an [`IngestTicket`] with the session's generation
//! and the image slot it targets; [`apply`] checks the ticket against the
//! live session and discards anything stale. A completion can therefore
//! never mutate a session that is no longer live.

use crate::session::EditSession;
use crate::types::WorkField;
use base64::Engine;
use std::sync::mpsc;
use std::thread;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unrecognized image format")]
    UnrecognizedFormat,
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Which image field an ingestion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Profile,
    /// Work entry by its index at submission time.
    Work(usize),
}

/// Captured at submission; decides whether a completion may still be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestTicket {
    pub slot: ImageSlot,
    pub generation: u64,
}

/// Result of one background encode, delivered over the request's channel.
#[derive(Debug)]
pub struct IngestCompletion {
    pub ticket: IngestTicket,
    pub result: Result<String, IngestError>,
}

/// What [`apply`] did with a completion.
#[derive(Debug)]
pub enum ApplyOutcome {
    /// The encoding was written into the targeted image field.
    Applied(ImageSlot),
    /// The submitting session is no longer live; completion discarded.
    Stale,
    /// The targeted work entry was removed after submission; discarded.
    SlotGone(usize),
    /// Encoding failed; the previous field value is untouched.
    Failed(IngestError),
}

/// Validate `bytes` as an image and return its embedded encoding.
///
/// Requires a full decode, not just a sniffable header — a truncated file
/// must not become an embedded encoding no consumer can render.
pub fn encode_image(bytes: &[u8]) -> Result<String, IngestError> {
    let format = image::guess_format(bytes).map_err(|_| IngestError::UnrecognizedFormat)?;
    image::load_from_memory_with_format(bytes, format)?;

    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

/// The external-URL input path: assignment, no ingestion.
pub fn accept_url(text: &str) -> String {
    text.trim().to_string()
}

/// Encode `bytes` on a background thread.
///
/// The completion arrives on the returned channel whenever the encode
/// finishes; the caller applies it with [`apply`]. Dropping the receiver
/// abandons the request.
pub fn spawn_encode(bytes: Vec<u8>, ticket: IngestTicket) -> mpsc::Receiver<IngestCompletion> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = encode_image(&bytes);
        // Receiver gone means the caller gave up on the request.
        let _ = tx.send(IngestCompletion { ticket, result });
    });
    rx
}

/// Apply a completion to the live session, or discard it.
///
/// The ticket's generation must match `session` exactly; completions from
/// committed, cancelled, or superseded sessions come back [`ApplyOutcome::Stale`].
pub fn apply(session: &mut EditSession, completion: IngestCompletion) -> ApplyOutcome {
    if completion.ticket.generation != session.generation() {
        return ApplyOutcome::Stale;
    }
    let encoded = match completion.result {
        Ok(encoded) => encoded,
        Err(error) => return ApplyOutcome::Failed(error),
    };
    match completion.ticket.slot {
        ImageSlot::Profile => {
            session.set_profile_image(&encoded);
            ApplyOutcome::Applied(ImageSlot::Profile)
        }
        ImageSlot::Work(index) => match session.update_work_field(index, WorkField::Img, &encoded) {
            Ok(()) => ApplyOutcome::Applied(ImageSlot::Work(index)),
            Err(_) => ApplyOutcome::SlotGone(index),
        },
    }
}
