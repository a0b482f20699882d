//! The `status-code` field of a response.

/// A two-byte status-code.
///
/// Per RFC 8011 §13.1, any value `0x0000..=0x00ff` is a "successful"
/// status, everything from `0x0400` up is a client or server error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i16)]
pub enum StatusCode {
    Ok = 0x0000,
    OkIgnoredOrSubstituted = 0x0001,
    OkConflicting = 0x0002,
    OkIgnoredSubscriptions = 0x0003,
    OkIgnoredNotifications = 0x0004,
    OkTooManyEvents = 0x0005,
    OkButCancelSubscription = 0x0006,
    OkEventsComplete = 0x0007,

    RedirectionOtherSite = 0x0200,
    CupsSeeOther = 0x0280,

    ErrorBadRequest = 0x0400,
    ErrorForbidden = 0x0401,
    ErrorNotAuthenticated = 0x0402,
    ErrorNotAuthorized = 0x0403,
    ErrorNotPossible = 0x0404,
    ErrorTimeout = 0x0405,
    ErrorNotFound = 0x0406,
    ErrorGone = 0x0407,
    ErrorRequestEntity = 0x0408,
    ErrorRequestValue = 0x0409,
    ErrorDocumentFormatNotSupported = 0x040a,
    ErrorAttributesOrValues = 0x040b,
    ErrorUriScheme = 0x040c,
    ErrorCharset = 0x040d,
    ErrorConflicting = 0x040e,
    ErrorCompressionError = 0x040f,
    ErrorDocumentFormatError = 0x0410,
    ErrorDocumentAccess = 0x0411,
    ErrorAttributesNotSettable = 0x0412,
    ErrorIgnoredAllSubscriptions = 0x0413,
    ErrorTooManySubscriptions = 0x0414,
    ErrorIgnoredAllNotifications = 0x0415,
    ErrorPrintSupportFileNotFound = 0x0416,
    ErrorDocumentPassword = 0x0417,
    ErrorDocumentPermission = 0x0418,
    ErrorDocumentSecurity = 0x0419,
    ErrorDocumentUnprintable = 0x041a,
    ErrorAccountInfoNeeded = 0x041b,
    ErrorAccountClosed = 0x041c,
    ErrorAccountLimitReached = 0x041d,
    ErrorAccountAuthorizationFailed = 0x041e,
    ErrorNotFetchable = 0x041f,
    ErrorCupsAccountInfoNeeded = 0x049c,
    ErrorCupsAccountClosed = 0x049d,
    ErrorCupsAccountLimitReached = 0x049e,
    ErrorCupsAccountAuthorizationFailed = 0x049f,

    ErrorInternal = 0x0500,
    ErrorOperationNotSupported = 0x0501,
    ErrorServiceUnavailable = 0x0502,
    ErrorVersionNotSupported = 0x0503,
    ErrorDevice = 0x0504,
    ErrorTemporary = 0x0505,
    ErrorNotAcceptingJobs = 0x0506,
    ErrorBusy = 0x0507,
    ErrorJobCanceled = 0x0508,
    ErrorMultipleJobsNotSupported = 0x0509,
    ErrorPrinterIsDeactivated = 0x050a,
    ErrorTooManyJobs = 0x050b,
    ErrorTooManyDocuments = 0x050c,

    ErrorCupsAuthenticationCanceled = 0x1000,
    ErrorCupsPki = 0x1001,
    ErrorCupsUpgradeRequired = 0x1002,
}

impl StatusCode {
    pub const fn as_i16(self) -> i16 {
        self as i16
    }

    /// Whether this status falls in the `0x0000..=0x00ff` "successful" class.
    pub const fn is_success(self) -> bool {
        (self as i16 as u16) <= 0x00ff
    }

    /// Decode a raw status-code value into a known variant, if recognized.
    ///
    /// Unlike [`crate::tag`]'s tags, an unrecognized status is not a decode
    /// error: servers may return status codes this crate doesn't enumerate,
    /// and callers should still see the raw value.
    pub fn from_i16(raw: i16) -> Option<Self> {
        use StatusCode::*;
        Some(match raw {
            0x0000 => Ok,
            0x0001 => OkIgnoredOrSubstituted,
            0x0002 => OkConflicting,
            0x0003 => OkIgnoredSubscriptions,
            0x0004 => OkIgnoredNotifications,
            0x0005 => OkTooManyEvents,
            0x0006 => OkButCancelSubscription,
            0x0007 => OkEventsComplete,
            0x0200 => RedirectionOtherSite,
            0x0280 => CupsSeeOther,
            0x0400 => ErrorBadRequest,
            0x0401 => ErrorForbidden,
            0x0402 => ErrorNotAuthenticated,
            0x0403 => ErrorNotAuthorized,
            0x0404 => ErrorNotPossible,
            0x0405 => ErrorTimeout,
            0x0406 => ErrorNotFound,
            0x0407 => ErrorGone,
            0x0408 => ErrorRequestEntity,
            0x0409 => ErrorRequestValue,
            0x040a => ErrorDocumentFormatNotSupported,
            0x040b => ErrorAttributesOrValues,
            0x040c => ErrorUriScheme,
            0x040d => ErrorCharset,
            0x040e => ErrorConflicting,
            0x040f => ErrorCompressionError,
            0x0410 => ErrorDocumentFormatError,
            0x0411 => ErrorDocumentAccess,
            0x0412 => ErrorAttributesNotSettable,
            0x0413 => ErrorIgnoredAllSubscriptions,
            0x0414 => ErrorTooManySubscriptions,
            0x0415 => ErrorIgnoredAllNotifications,
            0x0416 => ErrorPrintSupportFileNotFound,
            0x0417 => ErrorDocumentPassword,
            0x0418 => ErrorDocumentPermission,
            0x0419 => ErrorDocumentSecurity,
            0x041a => ErrorDocumentUnprintable,
            0x041b => ErrorAccountInfoNeeded,
            0x041c => ErrorAccountClosed,
            0x041d => ErrorAccountLimitReached,
            0x041e => ErrorAccountAuthorizationFailed,
            0x041f => ErrorNotFetchable,
            0x049c => ErrorCupsAccountInfoNeeded,
            0x049d => ErrorCupsAccountClosed,
            0x049e => ErrorCupsAccountLimitReached,
            0x049f => ErrorCupsAccountAuthorizationFailed,
            0x0500 => ErrorInternal,
            0x0501 => ErrorOperationNotSupported,
            0x0502 => ErrorServiceUnavailable,
            0x0503 => ErrorVersionNotSupported,
            0x0504 => ErrorDevice,
            0x0505 => ErrorTemporary,
            0x0506 => ErrorNotAcceptingJobs,
            0x0507 => ErrorBusy,
            0x0508 => ErrorJobCanceled,
            0x0509 => ErrorMultipleJobsNotSupported,
            0x050a => ErrorPrinterIsDeactivated,
            0x050b => ErrorTooManyJobs,
            0x050c => ErrorTooManyDocuments,
            0x1000 => ErrorCupsAuthenticationCanceled,
            0x1001 => ErrorCupsPki,
            0x1002 => ErrorCupsUpgradeRequired,
            _ => return None,
        })
    }
}

/// The `job-state` attribute value, RFC 8011 §5.3.7.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum JobState {
    Pending = 0x03,
    Held = 0x04,
    Processing = 0x05,
    Stopped = 0x06,
    Canceled = 0x07,
    Aborted = 0x08,
    Completed = 0x09,
}

/// The `document-state` attribute value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum DocumentState {
    Pending = 0x03,
    Processing = 0x05,
    Canceled = 0x07,
    Completed = 0x08,
}

/// The `printer-state` attribute value, RFC 8011 §5.4.11.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum PrinterState {
    Idle = 0x03,
    Processing = 0x04,
    Stopped = 0x05,
}
