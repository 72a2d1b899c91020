pub mod entry;
pub mod receipt;
pub mod reports;
pub mod anchor;
pub mod governance;
pub mod tenant;

pub use entry::{
    ChainEntry, EntryEvent, EntryKind, ExecutionStatus, AdminAction,
    ToolExecutionRequest, AdminAccessRequest, GapReport, GENESIS_HEAD,
};
pub use receipt::{ReceiptKind, forge_receipt_identifier};
pub use reports::{
    IntegrityReport, WitnessVerdict, WitnessVerification, RotationReport,
    SuspendReceipt, AnchorSweepSummary, AnchorSweepTotals, AnchorOutcome,
};
pub use anchor::{
    AnchorRecord, TombstoneRecord, DeletionCertificate, ShreddedArtifact,
    CryptoShredProof, RemotePurgeReport,
};
pub use governance::{GovernanceLedgerRecord, RaioAuthorization, RaioVerdict};
pub use tenant::TenantStatus;
