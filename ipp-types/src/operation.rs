//! The `operation-id` field of a request, and the CUPS/IPP operations it names.

/// A two-byte operation-id, as carried in a request's envelope.
///
/// Values `0x0000..=0x3fff` are the IANA-registered core IPP operations;
/// `0x4000` and above are vendor extensions, including the CUPS operations
/// below.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i16)]
pub enum Operation {
    PrintJob = 0x0002,
    PrintUri = 0x0003,
    ValidateJob = 0x0004,
    CreateJob = 0x0005,
    SendDocument = 0x0006,
    SendUri = 0x0007,
    CancelJob = 0x0008,
    GetJobAttributes = 0x0009,
    GetJobs = 0x000a,
    GetPrinterAttributes = 0x000b,
    HoldJob = 0x000c,
    ReleaseJob = 0x000d,
    RestartJob = 0x000e,
    PausePrinter = 0x0010,
    ResumePrinter = 0x0011,
    PurgeJobs = 0x0012,
    SetPrinterAttributes = 0x0013,
    SetJobAttributes = 0x0014,
    GetPrinterSupportedValues = 0x0015,
    CreatePrinterSubscriptions = 0x0016,
    CreateJobSubscriptions = 0x0017,
    GetSubscriptionAttributes = 0x0018,
    GetSubscriptions = 0x0019,
    RenewSubscription = 0x001a,
    CancelSubscription = 0x001b,
    GetNotifications = 0x001c,
    SendNotifications = 0x001d,
    GetResourceAttributes = 0x001e,
    GetResourceData = 0x001f,
    GetResources = 0x0020,
    GetPrintSupportFiles = 0x0021,
    EnablePrinter = 0x0022,
    DisablePrinter = 0x0023,
    PausePrinterAfterCurrentJob = 0x0024,
    HoldNewJobs = 0x0025,
    ReleaseHeldNewJobs = 0x0026,
    DeactivatePrinter = 0x0027,
    ActivatePrinter = 0x0028,
    RestartPrinter = 0x0029,
    ShutdownPrinter = 0x002a,
    StartupPrinter = 0x002b,
    ReprocessJob = 0x002c,
    CancelCurrentJob = 0x002d,
    SuspendCurrentJob = 0x002e,
    ResumeJob = 0x002f,
    PromoteJob = 0x0030,
    ScheduleJobAfter = 0x0031,
    CancelDocument = 0x0033,
    GetDocumentAttributes = 0x0034,
    GetDocuments = 0x0035,
    DeleteDocument = 0x0036,
    SetDocumentAttributes = 0x0037,
    CancelJobs = 0x0038,
    CancelMyJobs = 0x0039,
    ResubmitJob = 0x003a,
    CloseJob = 0x003b,
    IdentifyPrinter = 0x003c,
    ValidateDocument = 0x003d,
    AddDocumentImages = 0x003e,
    AcknowledgeDocument = 0x003f,
    AcknowledgeIdentifyPrinter = 0x0040,
    AcknowledgeJob = 0x0041,
    FetchDocument = 0x0042,
    FetchJob = 0x0043,
    GetOutputDeviceAttributes = 0x0044,
    UpdateActiveJobs = 0x0045,
    DeregisterOutputDevice = 0x0046,
    UpdateDocumentStatus = 0x0047,
    UpdateJobStatus = 0x0048,
    UpdateOutputDeviceAttributes = 0x0049,
    GetNextDocumentData = 0x004a,
    AllocatePrinterResources = 0x004b,
    CreatePrinter = 0x004c,
    DeallocatePrinterResources = 0x004d,
    DeletePrinter = 0x004e,
    GetPrinters = 0x004f,
    ShutdownOnePrinter = 0x0050,
    StartupOnePrinter = 0x0051,
    CancelResource = 0x0052,
    CreateResource = 0x0053,
    InstallResource = 0x0054,
    SendResourceData = 0x0055,
    SetResourceAttributes = 0x0056,
    CreateResourceSubscriptions = 0x0057,
    CreateSystemSubscriptions = 0x0058,
    DisableAllPrinters = 0x0059,
    EnableAllPrinters = 0x005a,
    GetSystemAttributes = 0x005b,
    GetSystemSupportedValues = 0x005c,
    PauseAllPrinters = 0x005d,
    PauseAllPrintersAfterCurrentJob = 0x005e,
    RegisterOutputDevice = 0x005f,
    RestartSystem = 0x0060,
    ResumeAllPrinters = 0x0061,
    SetSystemAttributes = 0x0062,
    ShutdownAllPrinters = 0x0063,
    StartupAllPrinters = 0x0064,

    /// Reserved start of the vendor-extension range (`0x4000`).
    Private = 0x4000,
    CupsGetDefault = 0x4001,
    CupsGetPrinters = 0x4002,
    CupsAddModifyPrinter = 0x4003,
    CupsDeletePrinter = 0x4004,
    CupsGetClasses = 0x4005,
    CupsAddModifyClass = 0x4006,
    CupsDeleteClass = 0x4007,
    CupsAcceptJobs = 0x4008,
    CupsRejectJobs = 0x4009,
    CupsSetDefault = 0x400a,
    CupsGetDevices = 0x400b,
    CupsGetPpds = 0x400c,
    CupsMoveJob = 0x400d,
    CupsAuthenticateJob = 0x400e,
    CupsGetPpd = 0x400f,
    CupsGetDocument = 0x4027,
    CupsCreateLocalPrinter = 0x4028,
}

impl Operation {
    pub const fn as_i16(self) -> i16 {
        self as i16
    }

    pub const fn is_cups_extension(self) -> bool {
        (self as i16 as u16) >= 0x4000
    }
}

impl From<Operation> for i16 {
    fn from(op: Operation) -> i16 {
        op.as_i16()
    }
}
