#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use anyhow::Result;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Frame, layout::Rect};
    use tempfile::tempdir;

    use crate::interactive::InteractiveApp;
    use crate::interactive::application::test_support::{
        MockCatalog, SAMPLE_TASK_ID, sample_detail, sample_hit,
    };
    use crate::interactive::domain::models::{ModalPhase, Mode};
    use crate::interactive::ui::events::Message;
    use crate::share_link::{DEFAULT_BASE, PARAM_QUERY, PARAM_TASK_ID, ShareLink};
    use crate::viewer::{ModelView, ViewerBackend};

    struct StubView;

    impl ModelView for StubView {
        fn render(&mut self, _f: &mut Frame, _area: Rect) {}
    }

    #[derive(Default)]
    struct CountingViewerBackend {
        activations: AtomicUsize,
    }

    impl ViewerBackend for CountingViewerBackend {
        fn activate(&self, _asset_url: &str) -> Result<Box<dyn ModelView>> {
            self.activations.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(StubView))
        }
    }

    fn create_test_app(catalog: Arc<MockCatalog>, download_dir: PathBuf) -> InteractiveApp {
        InteractiveApp::new(
            catalog,
            Arc::new(CountingViewerBackend::default()),
            ShareLink::new(DEFAULT_BASE),
            12,
            download_dir,
        )
    }

    #[test]
    fn test_search_flow_reaches_catalog_and_settles() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.script_search(Ok(vec![
            sample_hit(1, "a chrome dragon"),
            sample_hit(2, "a jade dragon"),
        ]));
        let dir = tempdir().unwrap();
        let mut app = create_test_app(catalog.clone(), dir.path().to_path_buf());

        let (tx, rx) = app.start_search_worker();
        app.search_tx = Some(tx);

        app.handle_message(Message::QueryChanged("dragon statue".to_string()));
        assert!(app.search_debounce.is_pending());

        app.handle_message(Message::CommitQuery);
        assert!(app.state.search.is_searching);

        let response = rx.recv_timeout(Duration::from_secs(2)).expect("search settles");
        app.handle_message(Message::SearchCompleted {
            id: response.id,
            query: response.query,
            result: response.result,
        });

        assert!(!app.state.search.is_searching);
        assert_eq!(app.state.search.results.len(), 2);
        assert_eq!(catalog.search_calls(), vec!["dragon statue".to_string()]);
        assert_eq!(app.state.link.get(PARAM_QUERY), Some("dragon statue"));
    }

    #[test]
    fn test_open_model_fetches_and_activates_the_viewer_once() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.script_task(Ok(sample_detail(
            "https://cdn.example.com/assets/astrolabe.glb",
        )));
        let dir = tempdir().unwrap();
        let backend = Arc::new(CountingViewerBackend::default());
        let mut app = InteractiveApp::new(
            catalog.clone(),
            backend.clone(),
            ShareLink::new(DEFAULT_BASE),
            12,
            dir.path().to_path_buf(),
        );

        let (tx, rx) = app.start_task_worker();
        app.task_tx = Some(tx);
        let (viewer_tx, viewer_rx) = app.start_viewer_worker();
        app.viewer_tx = Some(viewer_tx);

        app.handle_message(Message::OpenModel(SAMPLE_TASK_ID.to_string()));
        assert!(matches!(app.state.model.phase, ModalPhase::Loading { .. }));
        assert_eq!(app.state.link.get(PARAM_TASK_ID), Some(SAMPLE_TASK_ID));

        let response = rx.recv_timeout(Duration::from_secs(2)).expect("fetch settles");
        app.handle_message(Message::ModelFetchCompleted {
            id: response.id,
            task_id: response.task_id,
            result: response.result,
        });
        assert!(matches!(app.state.model.phase, ModalPhase::Ready { .. }));
        assert_eq!(catalog.task_calls(), vec![SAMPLE_TASK_ID.to_string()]);

        let activation = viewer_rx
            .recv_timeout(Duration::from_secs(2))
            .expect("activation settles");
        assert_eq!(
            activation.asset_url,
            "https://cdn.example.com/assets/astrolabe.glb"
        );
        assert!(activation.result.is_ok());
        assert_eq!(backend.activations.load(Ordering::SeqCst), 1);

        app.renderer
            .get_model_modal_mut()
            .resolve_activation(&activation.asset_url, activation.result);

        // A resolved asset does not activate again.
        assert!(
            !app.renderer
                .get_model_modal_mut()
                .begin_activation("https://cdn.example.com/assets/astrolabe.glb")
        );
    }

    #[test]
    fn test_download_flow_writes_into_the_download_dir() {
        let catalog = Arc::new(MockCatalog::new());
        let dir = tempdir().unwrap();
        let mut app = create_test_app(catalog.clone(), dir.path().to_path_buf());

        let (tx, rx) = app.start_download_worker();
        app.download_tx = Some(tx);

        app.handle_message(Message::OpenModel(SAMPLE_TASK_ID.to_string()));
        app.handle_message(Message::ModelFetchCompleted {
            id: app.state.model.current_fetch_id,
            task_id: SAMPLE_TASK_ID.to_string(),
            result: Ok(sample_detail("https://cdn.example.com/assets/out.glb")),
        });

        app.handle_message(Message::DownloadRequested);
        assert!(app.state.model.download_in_flight);

        let response = rx.recv_timeout(Duration::from_secs(2)).expect("download settles");
        app.handle_message(Message::DownloadCompleted {
            id: response.id,
            result: response.result,
        });

        assert!(!app.state.model.download_in_flight);
        assert!(dir.path().join("out.glb").exists());
        let message = app.state.ui.message.clone().expect("status message");
        assert!(message.contains("Saved"), "unexpected message: {message}");
    }

    #[test]
    fn test_bootstrap_replays_query_and_task_id_from_the_link() {
        let catalog = Arc::new(MockCatalog::new());
        let dir = tempdir().unwrap();
        let link = ShareLink::parse(
            "https://trivo.app/search?q=bronze+orrery&task_id=c504afa1-9629-45ee-a80c-7c128b80ce92",
        )
        .unwrap();
        let mut app = InteractiveApp::new(
            catalog,
            Arc::new(CountingViewerBackend::default()),
            link,
            12,
            dir.path().to_path_buf(),
        );

        let (tx, rx) = app.start_search_worker();
        app.search_tx = Some(tx);
        let (task_tx, task_rx) = app.start_task_worker();
        app.task_tx = Some(task_tx);

        app.bootstrap_from_link();

        assert_eq!(app.state.search.debounced_query, "bronze orrery");
        assert!(app.state.search.is_searching);
        assert!(matches!(app.state.model.phase, ModalPhase::Loading { .. }));

        let search = rx.recv_timeout(Duration::from_secs(2)).expect("search dispatched");
        assert_eq!(search.query, "bronze orrery");
        let fetch = task_rx
            .recv_timeout(Duration::from_secs(2))
            .expect("fetch dispatched");
        assert_eq!(fetch.task_id, SAMPLE_TASK_ID);
    }

    #[test]
    fn test_double_ctrl_c_exits_and_any_other_key_disarms() {
        let catalog = Arc::new(MockCatalog::new());
        let dir = tempdir().unwrap();
        let mut app = create_test_app(catalog, dir.path().to_path_buf());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert!(!app.handle_input(ctrl_c).unwrap());
        assert_eq!(
            app.state.ui.message.as_deref(),
            Some("Press Ctrl+C again to exit")
        );

        // Any other key disarms the prompt
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.handle_input(esc).unwrap());
        assert!(app.state.ui.message.is_none());

        // Armed again, the second press within the timeout exits
        assert!(!app.handle_input(ctrl_c).unwrap());
        assert!(app.handle_input(ctrl_c).unwrap());
    }

    #[test]
    fn test_question_mark_opens_help_and_any_key_closes_it() {
        let catalog = Arc::new(MockCatalog::new());
        let dir = tempdir().unwrap();
        let mut app = create_test_app(catalog, dir.path().to_path_buf());

        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(!app.handle_input(question).unwrap());
        assert_eq!(app.state.mode, Mode::Help);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.handle_input(esc).unwrap());
        assert_eq!(app.state.mode, Mode::Search);
    }
}
