use snowplow_tracker::{SelfDescribingJson, TrackerConfig, TransactionItem};

pub fn main() {
    env_logger::init();

    let collector = std::env::var("SNOWPLOW_COLLECTOR").unwrap();
    let mut tracker = TrackerConfig::new(collector, "demo", "demo-app")
        .completion_notifier(|outcome| {
            println!("Delivery outcome: {:?}", outcome);
        })
        .to_tracker()
        .unwrap();

    tracker.set_platform("srv");
    tracker.set_user_id("demo-user");
    tracker.set_timezone("Europe/London");

    let context = vec![SelfDescribingJson::new(
        "iglu:com.acme/user/jsonschema/1-0-0",
        serde_json::json!({"type": "tester"}),
    )];

    tracker
        .track_page_view(
            "http://www.example.com",
            Some("example page"),
            Some("google"),
            &context,
        )
        .unwrap();

    tracker
        .track_struct_event(
            "clothes",
            "add_to_basket",
            None,
            Some("red"),
            Some(15.0),
            &context,
        )
        .unwrap();

    let items = vec![TransactionItem {
        sku: "item-729".to_owned(),
        name: "red hat".to_owned(),
        category: Some("headgear".to_owned()),
        price: 10.0,
        quantity: 1,
        contexts: context.clone(),
    }];
    tracker
        .track_ecommerce_transaction(
            "order-7",
            Some("affiliate"),
            15.0,
            Some(5.0),
            Some(0.0),
            Some("Dover"),
            Some("Delaware"),
            Some("US"),
            Some("GBP"),
            &items,
            &context,
        )
        .unwrap();

    // Dispatches run on background threads; give them a moment to report
    // before the process exits.
    std::thread::sleep(std::time::Duration::from_secs(2));
}
