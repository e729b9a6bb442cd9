use thiserror::Error;

#[derive(Error, Debug)]
pub enum TesseralError {
    #[error("requested degree {requested} exceeds the gravity field maximum degree {available}")]
    UnsupportedFieldDegree { requested: usize, available: usize },

    #[error("requested order {requested} exceeds the gravity field maximum order {available}")]
    UnsupportedFieldOrder { requested: usize, available: usize },

    #[error("gravity field coefficient table is not lower-triangular at degree {0}")]
    MalformedCoefficientTable(usize),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),
}

impl PartialEq for TesseralError {
    fn eq(&self, other: &Self) -> bool {
        use TesseralError::*;
        match (self, other) {
            (
                UnsupportedFieldDegree {
                    requested: a,
                    available: b,
                },
                UnsupportedFieldDegree {
                    requested: c,
                    available: d,
                },
            ) => a == c && b == d,
            (
                UnsupportedFieldOrder {
                    requested: a,
                    available: b,
                },
                UnsupportedFieldOrder {
                    requested: c,
                    available: d,
                },
            ) => a == c && b == d,
            (MalformedCoefficientTable(a), MalformedCoefficientTable(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,
            _ => false,
        }
    }
}
