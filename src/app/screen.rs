// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

use crate::session::View;

/// Screens the user can navigate between.
///
/// Derived from the session on every frame; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Upload,
    Patients,
    Recommendations,
    Report,
}

impl Screen {
    /// Only the upload screen takes dropped files.
    #[must_use]
    pub fn accepts_file_drops(self) -> bool {
        self == Screen::Upload
    }
}

impl From<View> for Screen {
    fn from(view: View) -> Self {
        match view {
            View::Upload => Screen::Upload,
            View::PatientList => Screen::Patients,
            View::PatientDetail => Screen::Recommendations,
            View::Report => Screen::Report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_upload_screen_accepts_drops() {
        assert!(Screen::Upload.accepts_file_drops());
        assert!(!Screen::Patients.accepts_file_drops());
        assert!(!Screen::Recommendations.accepts_file_drops());
        assert!(!Screen::Report.accepts_file_drops());
    }

    #[test]
    fn session_views_map_one_to_one() {
        assert_eq!(Screen::from(View::Upload), Screen::Upload);
        assert_eq!(Screen::from(View::PatientList), Screen::Patients);
        assert_eq!(Screen::from(View::PatientDetail), Screen::Recommendations);
        assert_eq!(Screen::from(View::Report), Screen::Report);
    }
}
