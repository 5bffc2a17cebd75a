use change_notifier::mock::MockPublisher;
use change_notifier::{
    ChangeNotifier, Format, LifecycleEvent, Notifiable, NotifierConfig, PublishError,
    PublisherRegistry, PublisherSource, ResourceId,
};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

// --- Test Resource ---

#[derive(Debug, Clone, Serialize)]
struct Resource {
    id: u32,
    one: String,
    two: String,
    #[serde(skip)]
    errors: Vec<String>,
}

impl Resource {
    fn new(id: u32, one: &str, two: &str) -> Self {
        Self {
            id,
            one: one.into(),
            two: two.into(),
            errors: Vec::new(),
        }
    }
}

impl Notifiable for Resource {
    fn topic(&self) -> String {
        format!("https://example.com/resources/{}", self.id)
    }

    fn id(&self) -> ResourceId {
        self.id.into()
    }

    fn targets(&self) -> Vec<String> {
        vec!["target1".into(), "target2".into()]
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// --- Error log counter ---

#[derive(Clone, Default)]
struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn notifier_with(publisher: &MockPublisher) -> ChangeNotifier {
    ChangeNotifier::new(PublisherSource::instance(publisher.clone()))
}

// --- Tests ---

#[test]
fn publishes_full_resource_after_insert() {
    let publisher = MockPublisher::new();
    publisher.expect_publish().return_ok("urn:uuid:1");
    let notifier = notifier_with(&publisher);

    let resource = Resource::new(2, "c", "d");
    let dispatched = notifier
        .on_event(LifecycleEvent::AfterInsert, &resource)
        .unwrap()
        .expect("update should be dispatched");

    assert_eq!(dispatched.id, "urn:uuid:1");
    assert_eq!(dispatched.data, r#"{"id":2,"one":"c","two":"d"}"#);

    let received = publisher.received();
    assert_eq!(received.len(), 1, "publisher must be invoked exactly once");
    let update = &received[0];
    assert_eq!(update.topic(), "https://example.com/resources/2");
    assert_eq!(update.data(), r#"{"id":2,"one":"c","two":"d"}"#);
    assert_eq!(update.targets(), ["target1", "target2"]);
    publisher.verify();
}

#[test]
fn publishes_only_id_after_delete() {
    let publisher = MockPublisher::new();
    publisher.expect_publish().return_ok("urn:uuid:2");
    let notifier = notifier_with(&publisher);

    let resource = Resource::new(2, "c", "d");
    notifier.notify_delete(&resource).unwrap();

    let update = publisher.last_update().unwrap();
    assert_eq!(update.topic(), "https://example.com/resources/2");
    assert_eq!(update.data(), r#"{"@id":2}"#);
    assert_eq!(update.targets(), ["target1", "target2"]);
}

#[test]
fn never_publishes_resources_with_errors() {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let publisher = MockPublisher::new();
    let notifier = notifier_with(&publisher);

    let mut resource = Resource::new(3, "", "d");
    resource.errors.push("one cannot be blank".into());

    tracing::subscriber::with_default(subscriber, || {
        for event in [
            LifecycleEvent::AfterInsert,
            LifecycleEvent::AfterUpdate,
            LifecycleEvent::AfterDelete,
        ] {
            assert_eq!(notifier.on_event(event, &resource).unwrap(), None);
        }
    });

    assert!(publisher.received().is_empty());
    // A skip is a normal outcome, not a failure.
    assert_eq!(counter.count(), 0);
}

#[test]
fn format_changes_only_data() {
    let publisher = MockPublisher::new();
    publisher.expect_publish().return_ok("json");
    publisher.expect_publish().return_ok("xml");
    let resource = Resource::new(2, "c", "d");

    notifier_with(&publisher).notify_change(&resource).unwrap();
    notifier_with(&publisher)
        .with_format(Format::Xml)
        .notify_change(&resource)
        .unwrap();

    let received = publisher.received();
    let (json, xml) = (&received[0], &received[1]);
    assert_eq!(json.topic(), xml.topic());
    assert_eq!(json.targets(), xml.targets());
    assert_ne!(json.data(), xml.data());
    assert_eq!(
        xml.data(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <response><id>2</id><one>c</one><two>d</two></response>\n"
    );
}

#[test]
fn unresolved_publisher_logs_one_error_and_returns_none() {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    let result = tracing::subscriber::with_default(subscriber, || {
        let notifier = ChangeNotifier::from_config(
            &NotifierConfig::default(),
            PublisherRegistry::new(),
        );
        notifier.notify_change(&Resource::new(2, "c", "d"))
    });

    assert_eq!(result, Ok(None));
    assert_eq!(counter.count(), 1);
}

#[test]
fn publisher_failures_are_swallowed_and_logged() {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let publisher = MockPublisher::new();
    publisher
        .expect_publish()
        .return_err(PublishError::Configuration("missing JWT".into()));
    publisher
        .expect_publish()
        .return_err(PublishError::Rejected("403".into()));

    let results = tracing::subscriber::with_default(subscriber, || {
        let notifier = notifier_with(&publisher);
        let resource = Resource::new(4, "e", "f");
        (
            notifier.notify_change(&resource),
            notifier.notify_delete(&resource),
        )
    });

    assert_eq!(results, (Ok(None), Ok(None)));
    assert_eq!(counter.count(), 2);
    publisher.verify();
}

#[test]
fn late_registered_component_is_used() {
    let registry = PublisherRegistry::new();
    let notifier = ChangeNotifier::from_config(&NotifierConfig::default(), registry.clone());
    let resource = Resource::new(9, "x", "y");

    assert_eq!(notifier.notify_change(&resource).unwrap(), None);

    let publisher = MockPublisher::new();
    publisher.expect_publish().return_ok("urn:uuid:9");
    registry.register("publisher", Arc::new(publisher.clone()));

    let dispatched = notifier.notify_change(&resource).unwrap().unwrap();
    assert_eq!(dispatched.id, "urn:uuid:9");
    publisher.verify();
}

#[test]
fn string_ids_in_deletion_marker() {
    #[derive(Serialize)]
    struct Slugged {
        slug: &'static str,
    }

    impl Notifiable for Slugged {
        fn topic(&self) -> String {
            format!("https://example.com/pages/{}", self.slug)
        }

        fn id(&self) -> ResourceId {
            self.slug.into()
        }

        fn targets(&self) -> Vec<String> {
            vec!["*".into()]
        }

        fn has_errors(&self) -> bool {
            false
        }
    }

    let publisher = MockPublisher::new();
    publisher.expect_publish().echo_data();
    let dispatched = notifier_with(&publisher)
        .notify_delete(&Slugged { slug: "about" })
        .unwrap()
        .unwrap();
    assert_eq!(dispatched.data, r#"{"@id":"about"}"#);
}
