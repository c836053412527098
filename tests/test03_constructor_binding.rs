use sql_binder::bind_target;
use sql_binder::decode::{Overrides, decode_all};
use sql_binder::error::SqlBindError;
use sql_binder::mock::MockCursor;
use sql_binder::resolve::DescriptorCache;
use sql_binder::types::SqlValue;

#[derive(Debug, PartialEq)]
struct User {
    id: i64,
    user_name: String,
}

bind_target!(User {
    (id: i64, user_name: String) => User { id, user_name },
});

#[test]
fn snake_case_columns_bind_positionally() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut cursor = MockCursor::new(
            vec!["id", "user_name"],
            vec![
                vec![SqlValue::Int(1), SqlValue::Text("alice".to_string())],
                vec![SqlValue::Int(2), SqlValue::Text("bob".to_string())],
            ],
        );
        let users: Vec<User> = decode_all(&mut cursor, Overrides::new()).await?;
        assert_eq!(
            users,
            vec![
                User {
                    id: 1,
                    user_name: "alice".to_string()
                },
                User {
                    id: 2,
                    user_name: "bob".to_string()
                },
            ]
        );
        // Schema is retrieved once per result set, at the first row.
        assert_eq!(cursor.schema_calls(), 1);
        Ok(())
    })
}

#[test]
fn swapped_column_order_fails_resolution() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut cursor = MockCursor::new(
            vec!["user_name", "id"],
            vec![vec![SqlValue::Text("alice".to_string()), SqlValue::Int(1)]],
        );
        let result: Result<Vec<User>, _> = decode_all(&mut cursor, Overrides::new()).await;
        match result {
            Err(SqlBindError::NoMatchingConstructor { columns, .. }) => {
                assert_eq!(columns, "user_name, id");
            }
            other => panic!("expected NoMatchingConstructor, got {other:?}"),
        }
        Ok(())
    })
}

#[derive(Debug, PartialEq)]
struct Flagged {
    which: u8,
    id: i64,
}

// Two constructors with identical positional parameter names; the first in
// declared order must win.
bind_target!(Flagged {
    (id: i64) => Flagged { which: 1, id },
    (id: i64) => Flagged { which: 2, id },
});

#[test]
fn first_declared_constructor_wins_ties() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut cursor = MockCursor::new(vec!["id"], vec![vec![SqlValue::Int(42)]]);
        let rows: Vec<Flagged> = decode_all(&mut cursor, Overrides::new()).await?;
        assert_eq!(rows, vec![Flagged { which: 1, id: 42 }]);
        Ok(())
    })
}

#[derive(Debug, PartialEq)]
struct Shaped {
    id: i64,
    label: Option<String>,
}

bind_target!(Shaped {
    (id: i64) => Shaped { id, label: None },
    (id: i64, label: Option<String>) => Shaped { id, label },
});

#[test]
fn arity_selects_between_constructors() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut narrow = MockCursor::new(vec!["id"], vec![vec![SqlValue::Int(5)]]);
        let rows: Vec<Shaped> = decode_all(&mut narrow, Overrides::new()).await?;
        assert_eq!(rows, vec![Shaped { id: 5, label: None }]);

        let mut wide = MockCursor::new(
            vec!["id", "label"],
            vec![vec![SqlValue::Int(5), SqlValue::Text("z".to_string())]],
        );
        let rows: Vec<Shaped> = decode_all(&mut wide, Overrides::new()).await?;
        assert_eq!(
            rows,
            vec![Shaped {
                id: 5,
                label: Some("z".to_string())
            }]
        );
        Ok(())
    })
}

#[test]
fn null_column_binds_none_into_optional_parameter() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut cursor = MockCursor::new(
            vec!["id", "label"],
            vec![vec![SqlValue::Int(5), SqlValue::Null]],
        );
        let rows: Vec<Shaped> = decode_all(&mut cursor, Overrides::new()).await?;
        assert_eq!(rows, vec![Shaped { id: 5, label: None }]);
        Ok(())
    })
}

#[test]
fn shared_descriptor_cache_is_reusable_across_decodes() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let cache = DescriptorCache::new();
        for round in 0..3_i64 {
            let mut cursor = MockCursor::new(
                vec!["id", "user_name"],
                vec![vec![SqlValue::Int(round), SqlValue::Text("r".to_string())]],
            );
            let users: Vec<User> = sql_binder::Decoder::new(&mut cursor)
                .with_cache(&cache)
                .collect_all()
                .await?;
            assert_eq!(users[0].id, round);
        }
        Ok(())
    })
}

#[test]
fn shared_descriptor_cache_survives_concurrent_decodes() -> Result<(), Box<dyn std::error::Error>>
{
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let cache = std::sync::Arc::new(DescriptorCache::new());

        // Warm one entry so in-flight tasks mix cache hits with first-time
        // inserts for the other target shapes.
        let mut warm = MockCursor::new(
            vec!["id", "user_name"],
            vec![vec![SqlValue::Int(0), SqlValue::Text("w".to_string())]],
        );
        let _: Vec<User> = sql_binder::Decoder::new(&mut warm)
            .with_cache(&cache)
            .collect_all()
            .await?;

        let mut handles = Vec::new();
        for task in 0..16_i64 {
            let cache = std::sync::Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                if task % 2 == 0 {
                    let mut cursor = MockCursor::new(
                        vec!["id", "user_name"],
                        vec![vec![SqlValue::Int(task), SqlValue::Text("c".to_string())]],
                    );
                    let users: Vec<User> = sql_binder::Decoder::new(&mut cursor)
                        .with_cache(&cache)
                        .collect_all()
                        .await?;
                    Ok::<i64, SqlBindError>(users[0].id)
                } else {
                    let mut cursor =
                        MockCursor::new(vec!["id"], vec![vec![SqlValue::Int(task)]]);
                    let rows: Vec<Shaped> = sql_binder::Decoder::new(&mut cursor)
                        .with_cache(&cache)
                        .collect_all()
                        .await?;
                    Ok(rows[0].id)
                }
            }));
        }

        for (task, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.await?? as usize, task);
        }
        Ok(())
    })
}
