//! Key codes and key actions as the platform reports them.
//!
//! Button events carry the key name produced by [`key_code_name`] and the raw
//! action code as their value. Actions are not decoded into pressed/released.

use std::borrow::Cow;

pub const ACTION_DOWN: i32 = 0;
pub const ACTION_UP: i32 = 1;
pub const ACTION_MULTIPLE: i32 = 2;

const KEY_NAMES: &[(i32, &str)] = &[
    (4, "KEYCODE_BACK"),
    (19, "KEYCODE_DPAD_UP"),
    (20, "KEYCODE_DPAD_DOWN"),
    (21, "KEYCODE_DPAD_LEFT"),
    (22, "KEYCODE_DPAD_RIGHT"),
    (23, "KEYCODE_DPAD_CENTER"),
    (82, "KEYCODE_MENU"),
    (96, "KEYCODE_BUTTON_A"),
    (97, "KEYCODE_BUTTON_B"),
    (98, "KEYCODE_BUTTON_C"),
    (99, "KEYCODE_BUTTON_X"),
    (100, "KEYCODE_BUTTON_Y"),
    (101, "KEYCODE_BUTTON_Z"),
    (102, "KEYCODE_BUTTON_L1"),
    (103, "KEYCODE_BUTTON_R1"),
    (104, "KEYCODE_BUTTON_L2"),
    (105, "KEYCODE_BUTTON_R2"),
    (106, "KEYCODE_BUTTON_THUMBL"),
    (107, "KEYCODE_BUTTON_THUMBR"),
    (108, "KEYCODE_BUTTON_START"),
    (109, "KEYCODE_BUTTON_SELECT"),
    (110, "KEYCODE_BUTTON_MODE"),
    (188, "KEYCODE_BUTTON_1"),
    (189, "KEYCODE_BUTTON_2"),
    (190, "KEYCODE_BUTTON_3"),
    (191, "KEYCODE_BUTTON_4"),
    (192, "KEYCODE_BUTTON_5"),
    (193, "KEYCODE_BUTTON_6"),
    (194, "KEYCODE_BUTTON_7"),
    (195, "KEYCODE_BUTTON_8"),
    (196, "KEYCODE_BUTTON_9"),
    (197, "KEYCODE_BUTTON_10"),
    (198, "KEYCODE_BUTTON_11"),
    (199, "KEYCODE_BUTTON_12"),
    (200, "KEYCODE_BUTTON_13"),
    (201, "KEYCODE_BUTTON_14"),
    (202, "KEYCODE_BUTTON_15"),
    (203, "KEYCODE_BUTTON_16"),
];

/// Symbolic name of a key code.
///
/// Codes outside the gamepad table render as their decimal value, matching
/// what the platform does for codes it has no name for.
pub fn key_code_name(code: i32) -> Cow<'static, str> {
    match KEY_NAMES.binary_search_by_key(&code, |&(c, _)| c) {
        Ok(idx) => Cow::Borrowed(KEY_NAMES[idx].1),
        Err(_) => Cow::Owned(code.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(KEY_NAMES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_known_and_unknown_codes() {
        assert_eq!(key_code_name(96), "KEYCODE_BUTTON_A");
        assert_eq!(key_code_name(19), "KEYCODE_DPAD_UP");
        assert_eq!(key_code_name(203), "KEYCODE_BUTTON_16");
        assert_eq!(key_code_name(9999), "9999");
    }
}
