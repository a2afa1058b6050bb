#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::task_service::*;
    use super::super::test_support::{MockCatalog, SAMPLE_TASK_ID, sample_detail};
    use crate::interactive::domain::models::TaskFetchRequest;

    fn create_test_request(id: u64) -> TaskFetchRequest {
        TaskFetchRequest {
            id,
            task_id: SAMPLE_TASK_ID.to_string(),
        }
    }

    #[test]
    fn test_resolve_returns_detail_and_echoes_request() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.script_task(Ok(sample_detail("https://cdn.example.com/a.glb")));
        let service = TaskService::new(catalog);

        let response = service.resolve(create_test_request(3));

        assert_eq!(response.id, 3);
        assert_eq!(response.task_id, SAMPLE_TASK_ID);
        assert_eq!(
            response.result.unwrap().model,
            "https://cdn.example.com/a.glb"
        );
    }

    #[test]
    fn test_reopening_the_same_task_hits_the_cache() {
        let catalog = Arc::new(MockCatalog::new());
        let service = TaskService::new(catalog.clone());

        service.resolve(create_test_request(1));
        service.resolve(create_test_request(2));

        assert_eq!(catalog.task_calls().len(), 1);
    }

    #[test]
    fn test_failed_fetch_is_not_memoized() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.script_task(Err("404 Not Found".to_string()));
        let service = TaskService::new(catalog.clone());

        let failed = service.resolve(create_test_request(1));
        assert!(failed.result.unwrap_err().contains("404"));

        let retried = service.resolve(create_test_request(2));
        assert!(retried.result.is_ok());
        assert_eq!(catalog.task_calls().len(), 2);
    }
}
