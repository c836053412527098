use sql_binder::mock::{MockCursor, MockExecutor};
use sql_binder::prelude::*;

#[derive(Debug, PartialEq, Default)]
struct Item {
    id: i64,
    name: String,
}

param_source!(Item { id: i64, name: String });

bind_target!(Item {
    (id: i64, name: String) => Item { id, name },
});

#[test]
fn encode_then_decode_reconstructs_an_equal_object() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let original = Item {
            id: 7,
            name: "x".to_string(),
        };
        let query = Query::with_source(
            "SELECT id, name FROM items WHERE id = :id AND name = :name",
            &original,
        )?;
        assert_eq!(query.params.len(), 2);

        // Synthetic single-row result echoing the encoded values.
        let echo = MockCursor::new(
            vec!["id", "name"],
            vec![vec![query.params[0].value.clone(), query.params[1].value.clone()]],
        );
        let mut executor = MockExecutor::new().with_result(echo);

        let decoded: Vec<Item> = fetch_all(&mut executor, &query, Overrides::new()).await?;
        assert_eq!(decoded, vec![original]);

        // The executor saw the full encoded parameter set, named literally.
        let (text, params) = &executor.executed()[0];
        assert_eq!(text, &query.text);
        assert_eq!(params[0].name, "id");
        assert_eq!(params[0].wire_type, WireType::Bigint);
        assert_eq!(params[1].name, "name");
        Ok(())
    })
}

#[test]
fn fetch_first_or_default_takes_first_row() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let rows = MockCursor::new(
            vec!["id", "name"],
            vec![
                vec![SqlValue::Int(1), SqlValue::Text("first".to_string())],
                vec![SqlValue::Int(2), SqlValue::Text("second".to_string())],
            ],
        );
        let mut executor = MockExecutor::new().with_result(rows);

        let query = Query::new("SELECT id, name FROM items");
        let item: Item = fetch_first_or_default(&mut executor, &query, Overrides::new()).await?;
        assert_eq!(
            item,
            Item {
                id: 1,
                name: "first".to_string()
            }
        );
        Ok(())
    })
}

#[test]
fn fetch_first_or_default_on_empty_result_yields_default()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let empty = MockCursor::new(vec!["id", "name"], vec![]);
        let mut executor = MockExecutor::new().with_result(empty);

        let query = Query::new("SELECT id, name FROM items WHERE 1 = 0");
        let item: Item = fetch_first_or_default(&mut executor, &query, Overrides::new()).await?;
        assert_eq!(item, Item::default());
        Ok(())
    })
}
