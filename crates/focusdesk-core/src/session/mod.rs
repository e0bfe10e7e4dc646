mod collab;
mod orchestrator;

pub use collab::{
    AudioCue, NoopNotifier, NoopPresence, NoopPresentation, Notifier, PresenceHint,
    PresenceNotifier, Presentation, SilentAudio, Tone, REST_MELODY, WORK_MELODY,
};
pub use orchestrator::{Collaborators, Command, SessionOrchestrator};
