// Domain models

mod container;

pub use container::{ContainerRecord, MetadataLabels, StatusCounts};
