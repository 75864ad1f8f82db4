use fuq_core::errors::{ErrorInfo, FuqError};

/// Index of a single wanted column.
pub fn find_column<S: AsRef<str>>(columns: &[S], wanted: &str) -> Result<usize, FuqError> {
    columns
        .iter()
        .position(|column| column.as_ref() == wanted)
        .ok_or_else(|| {
            FuqError::Log(
                ErrorInfo::new(
                    "column-missing",
                    format!("{wanted} is not a column of the thermo output"),
                )
                .with_context("column", wanted)
                .with_context(
                    "available",
                    columns
                        .iter()
                        .map(|c| c.as_ref())
                        .collect::<Vec<_>>()
                        .join(" "),
                )
                .with_hint("add the keyword to thermo_style in the input template"),
            )
        })
}

/// Resolves every wanted name to its column index, preserving the order of `wanted`.
pub fn find_columns<S, W>(columns: &[S], wanted: &[W]) -> Result<Vec<usize>, FuqError>
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    wanted
        .iter()
        .map(|name| find_column(columns, name.as_ref()))
        .collect()
}
