use sql_binder::bind_target;
use sql_binder::cursor::Cursor;
use sql_binder::decode::{Decoder, Overrides, decode_all, decode_first, decode_first_or_default};
use sql_binder::error::SqlBindError;
use sql_binder::mock::MockCursor;
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
fn empty_result_yields_empty_sequence_without_schema() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut cursor = MockCursor::new(vec!["id", "user_name"], vec![]);
        let users: Vec<User> = decode_all(&mut cursor, Overrides::new()).await?;
        assert!(users.is_empty());
        // The resolver was never consulted; neither was the schema.
        assert_eq!(cursor.schema_calls(), 0);
        Ok(())
    })
}

#[test]
fn decode_first_on_empty_result_is_none() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut cursor = MockCursor::new(vec!["name"], vec![]);
        let first: Option<String> = decode_first(&mut cursor, Overrides::new()).await?;
        assert_eq!(first, None);

        let mut cursor = MockCursor::new(vec!["name"], vec![]);
        let defaulted: String = decode_first_or_default(&mut cursor, Overrides::new()).await?;
        assert_eq!(defaulted, String::new());
        Ok(())
    })
}

#[test]
fn schema_unavailable_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut cursor = MockCursor::new(
            vec!["id", "user_name"],
            vec![vec![SqlValue::Int(1), SqlValue::Text("a".to_string())]],
        )
        .without_schema();
        let result: Result<Vec<User>, _> = decode_all(&mut cursor, Overrides::new()).await;
        assert!(matches!(result, Err(SqlBindError::SchemaUnavailable(_))));
        Ok(())
    })
}

#[test]
fn decoder_is_fused_after_a_row_level_failure() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        // Second row carries text where an integer is expected.
        let mut cursor = MockCursor::new(
            vec!["id", "user_name"],
            vec![
                vec![SqlValue::Int(1), SqlValue::Text("a".to_string())],
                vec![SqlValue::Text("oops".to_string()), SqlValue::Text("b".to_string())],
                vec![SqlValue::Int(3), SqlValue::Text("c".to_string())],
            ],
        );
        let mut decoder: Decoder<'_, _, User> = Decoder::new(&mut cursor);

        let first = decoder.try_next().await?;
        assert_eq!(
            first,
            Some(User {
                id: 1,
                user_name: "a".to_string()
            })
        );

        assert!(decoder.try_next().await.is_err());

        // No partial object for the failed row, and the remaining rows are
        // not attempted: the sequence has aborted.
        assert_eq!(decoder.try_next().await?, None);
        Ok(())
    })
}

#[test]
fn abandoning_the_decoder_releases_the_cursor() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut cursor = MockCursor::new(
            vec!["name"],
            vec![
                vec![SqlValue::Text("a".to_string())],
                vec![SqlValue::Text("b".to_string())],
            ],
        );
        {
            let mut decoder: Decoder<'_, _, String> = Decoder::new(&mut cursor);
            let first = decoder.try_next().await?;
            assert_eq!(first, Some("a".to_string()));
            // Dropped here with a row still pending.
        }
        // The cursor is usable again by its owner; one row remains.
        assert!(cursor.advance().await?);
        assert!(!cursor.advance().await?);
        Ok(())
    })
}
