//! QR scan modal flow: idle -> permission prompt -> scanning

/// Modal state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QrScanState {
    #[default]
    Idle,
    PermissionPrompt,
    Scanning,
}

/// QR modal including the camera permission round trip
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QrScan {
    pub state: QrScanState,
    /// Last permission prompt was refused
    pub denied: bool,
    /// Outstanding permission request, if any
    pub pending_request: Option<u64>,
}

impl QrScan {
    pub fn is_open(&self) -> bool {
        self.state != QrScanState::Idle
    }

    pub fn open(&mut self) {
        self.state = QrScanState::PermissionPrompt;
        self.denied = false;
        self.pending_request = None;
    }

    /// Close the modal; returns the request that no longer matters
    pub fn close(&mut self) -> Option<u64> {
        self.state = QrScanState::Idle;
        self.denied = false;
        self.pending_request.take()
    }

    /// QR button: opens when idle, closes otherwise
    pub fn toggle(&mut self) -> Option<u64> {
        if self.is_open() {
            self.close()
        } else {
            self.open();
            None
        }
    }

    /// Start a permission request; false if one can't be issued now
    pub fn begin_permission_request(&mut self, id: u64) -> bool {
        if self.state != QrScanState::PermissionPrompt || self.pending_request.is_some() {
            return false;
        }
        self.pending_request = Some(id);
        self.denied = false;
        true
    }

    /// Apply a permission result; stale ids are ignored
    pub fn permission_resolved(&mut self, id: u64, granted: bool) -> bool {
        if self.pending_request != Some(id) || self.state != QrScanState::PermissionPrompt {
            return false;
        }
        self.pending_request = None;
        if granted {
            self.state = QrScanState::Scanning;
        } else {
            self.denied = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_moves_to_scanning() {
        let mut qr = QrScan::default();
        qr.open();
        assert_eq!(qr.state, QrScanState::PermissionPrompt);
        assert!(qr.begin_permission_request(1));
        assert!(qr.permission_resolved(1, true));
        assert_eq!(qr.state, QrScanState::Scanning);
        assert_eq!(qr.close(), None);
        assert_eq!(qr.state, QrScanState::Idle);
    }

    #[test]
    fn test_denial_stays_in_prompt() {
        let mut qr = QrScan::default();
        qr.open();
        qr.begin_permission_request(1);
        qr.permission_resolved(1, false);
        assert_eq!(qr.state, QrScanState::PermissionPrompt);
        assert!(qr.denied);

        // retry is allowed
        assert!(qr.begin_permission_request(2));
        assert!(!qr.denied);
    }

    #[test]
    fn test_result_after_close_is_ignored() {
        let mut qr = QrScan::default();
        qr.open();
        qr.begin_permission_request(5);
        assert_eq!(qr.toggle(), Some(5));
        assert!(!qr.permission_resolved(5, true));
        assert_eq!(qr.state, QrScanState::Idle);
    }

    #[test]
    fn test_no_request_from_idle_or_scanning() {
        let mut qr = QrScan::default();
        assert!(!qr.begin_permission_request(1));
        qr.open();
        qr.begin_permission_request(1);
        qr.permission_resolved(1, true);
        assert!(!qr.begin_permission_request(2));
    }
}
