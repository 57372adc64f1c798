use thiserror::Error;

/// Every failure the program can report. Each variant's display text is
/// the exact message printed to the user after the `Error: ` prefix.
#[derive(Debug, Error)]
pub enum Error {
    #[error("too few command line arguments")]
    TooFewArgs,

    #[error("too many command line arguments")]
    TooManyArgs,

    #[error("invalid number of trains")]
    InvalidTrainCount,

    #[error("missing 'stations:' or 'connections:' section")]
    MissingSections,

    #[error("invalid station format")]
    InvalidStationFormat,

    #[error("coordinates must be positive integers")]
    InvalidCoords,

    #[error("duplicate station name")]
    DuplicateStation,

    #[error("duplicate coordinates")]
    DuplicateCoords,

    #[error("connection includes a non-existent station")]
    InvalidConnection,

    #[error("duplicate connection")]
    DuplicateConnection,

    #[error("map contains more than 10000 stations")]
    MapTooLarge,

    #[error("start station does not exist")]
    StartStationNotFound,

    #[error("end station does not exist")]
    EndStationNotFound,

    #[error("start and end station cannot be the same")]
    SameStartAndEnd,

    #[error("no path exists between start and end stations")]
    NoPath,

    /// The scheduler ran past its defensive turn limit. Indicates a bug
    /// in route planning or movement, never a property of the input.
    #[error("simulation exceeded maximum turns")]
    TurnLimitExceeded,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
