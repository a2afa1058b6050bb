pub mod download_service;
pub mod search_service;
pub mod task_service;

#[cfg(test)]
pub mod test_support;

#[cfg(test)]
mod task_service_test;
