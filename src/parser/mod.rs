mod messages;

pub use messages::{
    count_listed_frames, read_session_start, MalformedLine, MessageParser,
    CAMERA_ID_WIDTH, FRAMES_TOKEN, FRAME_LOSS_MARKER, MISSING_DATA_MARKER, REGISTRATION_MARKER,
};
