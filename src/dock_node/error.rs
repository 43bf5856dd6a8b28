/// Why a node operation could not run.
///
/// These never escape the public API: [`super::DockNode`] logs them and leaves its state untouched
/// so the operation can be retried once the missing piece is supplied.
#[derive(Debug)]
pub enum DockError {
    MissingContents,
    MissingDockPosition,
    MissingLayoutHost,

    /// The weak host reference outlived the host.
    LayoutHostDropped,

    /// The host is mutably borrowed further up the call stack.
    LayoutHostBusy,

    MissingCaptionBar { title: String },

    /// Loading contents failed; a placeholder was installed instead.
    ContentLoad(String),
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContents => write!(f, "contents is not set, can not lay out without contents"),
            Self::MissingDockPosition => {
                write!(f, "dock position is not set, can not lay out without a position")
            }
            Self::MissingLayoutHost => {
                write!(f, "layout host is not set, can not lay out without a host")
            }
            Self::LayoutHostDropped => write!(f, "layout host was dropped"),
            Self::LayoutHostBusy => write!(f, "layout host is already borrowed"),
            Self::MissingCaptionBar { title } => {
                write!(f, "node {title:?} has no caption bar")
            }
            Self::ContentLoad(err) => write!(f, "could not load contents: {err}"),
        }
    }
}

impl std::error::Error for DockError {}
