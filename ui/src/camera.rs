//! Camera acquisition and the capture state machine.
//!
//! The state machine is plain Rust so the transition rules are testable on
//! any target; the browser glue below it only moves `MediaStream` handles
//! around.

/// Camera selection preference (front or back).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacingMode {
    /// The rear camera, preferred for photographing the party.
    #[default]
    Environment,
    User,
}

impl FacingMode {
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::Environment => FacingMode::User,
            FacingMode::User => FacingMode::Environment,
        }
    }

    /// The `facingMode` constraint value.
    pub fn as_constraint(self) -> &'static str {
        match self {
            FacingMode::Environment => "environment",
            FacingMode::User => "user",
        }
    }
}

/// One `getUserMedia` attempt. The ladder runs most to least specific; the
/// first rung the browser satisfies wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintRung {
    /// Ideal facing mode plus an ideal resolution.
    IdealFacingWithResolution {
        facing: FacingMode,
        width: u32,
        height: u32,
    },
    /// Facing mode only.
    Facing(FacingMode),
    /// Any camera at all.
    AnyCamera,
}

pub fn constraint_ladder(facing: FacingMode) -> [ConstraintRung; 3] {
    [
        ConstraintRung::IdealFacingWithResolution {
            facing,
            width: 1280,
            height: 720,
        },
        ConstraintRung::Facing(facing),
        ConstraintRung::AnyCamera,
    ]
}

/// Lifecycle phases of the camera controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraPhase {
    #[default]
    Idle,
    Requesting,
    Active,
    Stopped,
}

/// Phase transitions, facing preference and the one-shot readiness latch.
/// Owns no browser handles itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraSession {
    phase: CameraPhase,
    facing: FacingMode,
    ready: bool,
}

impl CameraSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Entering a new request resets readiness. Valid from any phase: a flip
    /// re-requests from `Active`.
    pub fn begin_request(&mut self) {
        self.phase = CameraPhase::Requesting;
        self.ready = false;
    }

    pub fn mark_active(&mut self) {
        self.phase = CameraPhase::Active;
    }

    /// The readiness latch. Returns `true` exactly once per request, no
    /// matter how many readiness signals race in, and never outside an
    /// active stream.
    pub fn mark_ready(&mut self) -> bool {
        if self.ready || self.phase != CameraPhase::Active {
            return false;
        }
        self.ready = true;
        true
    }

    /// Toggles the facing preference for the next request.
    pub fn flip(&mut self) -> FacingMode {
        self.facing = self.facing.toggled();
        self.facing
    }

    /// Safe to call at any time, any number of times. Returns whether a
    /// stream was actually live.
    pub fn stop(&mut self) -> bool {
        let was_live = matches!(self.phase, CameraPhase::Requesting | CameraPhase::Active);
        self.phase = CameraPhase::Stopped;
        self.ready = false;
        was_live
    }
}

/// A frame may only be captured once the stream reports its dimensions.
pub fn capture_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        None
    } else {
        Some((width, height))
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::wasm32::*;

/// Browser glue for acquiring and releasing the stream. Only the capture
/// view reaches for it, and that view is browser-only.
#[cfg(target_arch = "wasm32")]
mod wasm32 {
    use js_sys::Reflect;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlVideoElement;
    use web_sys::MediaStream;
    use web_sys::MediaStreamConstraints;

    use super::constraint_ladder;
    use super::ConstraintRung;
    use super::FacingMode;
    use crate::error::ShareError;

    /// Walks the constraint ladder; the first granted stream is returned.
    pub async fn request_camera_stream(facing: FacingMode) -> Result<MediaStream, ShareError> {
        let media_devices = match web_sys::window().and_then(|w| w.navigator().media_devices().ok())
        {
            Some(devices) => devices,
            None => return Err(ShareError::CameraApiMissing),
        };

        let mut last_error = String::new();
        for rung in constraint_ladder(facing) {
            let constraints = match constraints_for(&rung) {
                Ok(constraints) => constraints,
                Err(err) => {
                    last_error = describe_js_error(&err);
                    continue;
                }
            };

            let promise = match media_devices.get_user_media_with_constraints(&constraints) {
                Ok(promise) => promise,
                Err(err) => {
                    last_error = describe_js_error(&err);
                    continue;
                }
            };

            match JsFuture::from(promise).await {
                Ok(stream) => return Ok(MediaStream::from(stream)),
                Err(err) => last_error = describe_js_error(&err),
            }
        }

        dioxus_logger::tracing::warn!("camera error: {last_error}");
        Err(ShareError::camera_unavailable(is_secure_context()))
    }

    /// Attaches the stream and starts playback; readiness may already hold
    /// by the time `play` resolves, so the caller re-checks `readyState`.
    pub async fn attach_and_play(video: &HtmlVideoElement, stream: &MediaStream) {
        video.set_src_object(Some(stream));
        if let Ok(playing) = video.play() {
            let _ = JsFuture::from(playing).await;
        }
    }

    /// Releases every track of the stream. Stopping a track twice is
    /// harmless, so this is idempotent.
    pub fn stop_stream(stream: &MediaStream) {
        stream
            .get_tracks()
            .for_each(&mut |track, _, _| web_sys::MediaStreamTrack::from(track).stop());
    }

    /// Whether the page could legitimately prompt for the camera at all.
    pub fn is_secure_context() -> bool {
        web_sys::window()
            .map(|window| {
                let location = window.location();
                location.protocol().ok().as_deref() == Some("https:")
                    || location.hostname().ok().as_deref() == Some("localhost")
            })
            .unwrap_or(false)
    }

    fn constraints_for(rung: &ConstraintRung) -> Result<MediaStreamConstraints, JsValue> {
        let mut constraints = MediaStreamConstraints::new();

        match rung {
            ConstraintRung::IdealFacingWithResolution {
                facing,
                width,
                height,
            } => {
                let video = js_sys::Object::new();

                let facing_constraint = js_sys::Object::new();
                Reflect::set(
                    &facing_constraint,
                    &"ideal".into(),
                    &facing.as_constraint().into(),
                )?;
                Reflect::set(&video, &"facingMode".into(), &facing_constraint)?;

                let width_constraint = js_sys::Object::new();
                Reflect::set(&width_constraint, &"ideal".into(), &(*width).into())?;
                Reflect::set(&video, &"width".into(), &width_constraint)?;

                let height_constraint = js_sys::Object::new();
                Reflect::set(&height_constraint, &"ideal".into(), &(*height).into())?;
                Reflect::set(&video, &"height".into(), &height_constraint)?;

                constraints.video(&video.into());
            }
            ConstraintRung::Facing(facing) => {
                let video = js_sys::Object::new();
                Reflect::set(&video, &"facingMode".into(), &facing.as_constraint().into())?;
                constraints.video(&video.into());
            }
            ConstraintRung::AnyCamera => {
                constraints.video(&JsValue::from(true));
            }
        }

        constraints.audio(&JsValue::from(false));
        Ok(constraints)
    }

    fn describe_js_error(err: &JsValue) -> String {
        err.as_string().unwrap_or_else(|| format!("{err:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_runs_most_to_least_specific() {
        let ladder = constraint_ladder(FacingMode::User);
        assert_eq!(
            ladder[0],
            ConstraintRung::IdealFacingWithResolution {
                facing: FacingMode::User,
                width: 1280,
                height: 720,
            }
        );
        assert_eq!(ladder[1], ConstraintRung::Facing(FacingMode::User));
        assert_eq!(ladder[2], ConstraintRung::AnyCamera);
    }

    #[test]
    fn readiness_fires_exactly_once_per_request() {
        let mut session = CameraSession::new();
        session.begin_request();

        // Signals arriving before the stream is active are ignored.
        assert!(!session.mark_ready());

        session.mark_active();
        assert!(session.mark_ready());
        assert!(!session.mark_ready());
        assert!(!session.mark_ready());

        // A new request re-arms the latch.
        session.begin_request();
        session.mark_active();
        assert!(session.mark_ready());
    }

    #[test]
    fn stop_is_an_idempotent_no_op_after_the_first_call() {
        let mut session = CameraSession::new();
        session.begin_request();
        session.mark_active();

        assert!(session.stop());
        assert!(!session.stop());
        assert!(!session.stop());
        assert_eq!(session.phase(), CameraPhase::Stopped);
        assert!(!session.is_ready());
    }

    #[test]
    fn flip_toggles_the_facing_preference() {
        let mut session = CameraSession::new();
        assert_eq!(session.facing(), FacingMode::Environment);
        assert_eq!(session.flip(), FacingMode::User);
        assert_eq!(session.flip(), FacingMode::Environment);
    }

    #[test]
    fn capture_requires_known_dimensions() {
        assert_eq!(capture_dimensions(0, 720), None);
        assert_eq!(capture_dimensions(1280, 0), None);
        assert_eq!(capture_dimensions(1280, 720), Some((1280, 720)));
    }
}
