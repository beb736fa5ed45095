use crate::app::ingest::IngestMode;
use crate::projection::FindingsTab;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandCmd {
    ExpandAll,
    CollapseAll,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // Session
    SignIn,
    SignOut,

    // Ingestion
    SetMode(IngestMode),
    PickLocalFolder,
    PickZip,
    PreviewStructure,
    Analyze,
    Store,

    // Stored datasets
    RefreshStored,
    SelectStored(String),
    DeleteStored(String),

    // Tree / viewer
    ExpandAll,
    CollapseAll,
    OpenFile(String),
    SelectTab(FindingsTab),

    DismissNotice,
}
