mod cameras;
mod frames;
#[cfg(test)]
mod tests;

pub use cameras::{find_cameras, find_cameras_with};
pub use frames::{
    count_frames_lost, count_frames_lost_with, count_frames_missing_data,
    count_frames_missing_data_with,
};
