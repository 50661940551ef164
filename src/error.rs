use snafu::Location;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display(
        "Region too small, region_len: {}, offset: {}, capacity: {}",
        region_len,
        offset,
        capacity
    ))]
    Size {
        region_len: usize,
        offset: usize,
        capacity: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid parameter, detail: {}", detail))]
    InvalidParameter {
        detail: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Usize add overflow, a: {}, b: {}", a, b))]
    UsizeAddOverflow {
        a: usize,
        b: usize,
        #[snafu(implicit)]
        location: Location,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
