// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use qr_monitor::constants::{self, colors};

#[test]
fn test_detection_and_caption_colors_differ() {
    assert_eq!(colors::DETECTION, [0, 255, 0]);
    assert_eq!(colors::CAPTION, [255, 0, 0]);
}

#[test]
fn test_window_title_names_camera() {
    assert_eq!(constants::window_title(4), "QR Monitor - Camera 4");
}

#[test]
fn test_quit_key_is_lowercase_q() {
    assert_eq!(constants::QUIT_KEY, 'q');
}
