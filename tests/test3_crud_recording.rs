mod common;

use common::{AuditEntry, Call, Counter, RecordingExecutor, User};
use sql_record::crud;
use sql_record::prelude::*;
use sql_record::record::{FieldDef, RecordDescriptor};

fn new_user() -> User {
    User {
        id: 0,
        name: "Ana".into(),
        email: "ana@example.com".into(),
        session_token: "tok".into(),
    }
}

#[tokio::test]
async fn create_with_zero_identity_requests_it_back() {
    let mut exec = RecordingExecutor::default();
    exec.push_rows(&["id"], vec![vec![RowValues::Int(101)]]);

    let mut user = new_user();
    crud::create(&mut exec, &mut user).await.unwrap();

    assert_eq!(user.id, 101);
    assert_eq!(
        exec.last(),
        &Call::Select(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id".into(),
            vec![
                RowValues::Text("Ana".into()),
                RowValues::Text("ana@example.com".into())
            ],
        )
    );
}

#[tokio::test]
async fn create_with_explicit_identity_skips_returning() {
    let mut exec = RecordingExecutor::default();
    let mut user = User {
        id: 5,
        ..new_user()
    };
    crud::create(&mut exec, &mut user).await.unwrap();

    match exec.last() {
        Call::Dml(sql, params) => {
            assert_eq!(sql, "INSERT INTO users (id, name, email) VALUES ($1, $2, $3)");
            assert_eq!(params[0], RowValues::Int(5));
        }
        other => panic!("expected DML, got {other:?}"),
    }
    assert_eq!(user.id, 5);
}

#[tokio::test]
async fn create_without_identity_is_plain_insert() {
    let mut exec = RecordingExecutor::default();
    let mut entry = AuditEntry {
        message: "boot".into(),
        level: 1,
    };
    crud::create(&mut exec, &mut entry).await.unwrap();
    assert_eq!(
        exec.last(),
        &Call::Dml(
            "INSERT INTO audit_log (message, level) VALUES ($1, $2)".into(),
            vec![RowValues::Text("boot".into()), RowValues::Int(1)],
        )
    );
}

#[tokio::test]
async fn create_with_only_identity_uses_defaults() {
    let mut exec = RecordingExecutor::default();
    exec.push_rows(&["id"], vec![vec![RowValues::Int(3)]]);
    let mut counter = Counter::default();
    crud::create(&mut exec, &mut counter).await.unwrap();
    assert_eq!(counter.id, 3);
    assert_eq!(
        exec.last(),
        &Call::Select("INSERT INTO counters DEFAULT VALUES RETURNING id".into(), vec![])
    );
}

#[tokio::test]
async fn unique_violation_is_reported_as_constraint_violation() {
    let mut exec = RecordingExecutor::default();
    exec.push_select(Err(SqlRecordError::Database {
        code: Some("23505".into()),
        message: "duplicate key value violates unique constraint \"users_email_key\"".into(),
    }));

    let mut user = new_user();
    let err = crud::create(&mut exec, &mut user).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
    assert_eq!(err.sql_state(), Some("23505"));
    assert!(err.to_string().contains("users"));
    assert_eq!(user.id, 0);
}

#[tokio::test]
async fn find_by_id_materializes_first_row() {
    let mut exec = RecordingExecutor::default();
    exec.push_rows(
        &["id", "name", "email", "created_at"],
        vec![vec![
            RowValues::Int(8),
            RowValues::Text("Cy".into()),
            RowValues::Text("cy@example.com".into()),
            RowValues::Null,
        ]],
    );

    let user: User = crud::find_by_id(&mut exec, 8).await.unwrap();
    assert_eq!(user.name, "Cy");
    assert_eq!(
        exec.last(),
        &Call::Select(
            "SELECT * FROM users WHERE id = $1".into(),
            vec![RowValues::Int(8)]
        )
    );
}

#[tokio::test]
async fn find_by_id_without_rows_is_not_found() {
    let mut exec = RecordingExecutor::default();
    let err = crud::find_by_id::<_, User>(&mut exec, 404).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn find_all_and_find_where() {
    let mut exec = RecordingExecutor::default();
    exec.push_rows(
        &["id", "name"],
        vec![
            vec![RowValues::Int(1), RowValues::Text("a".into())],
            vec![RowValues::Int(2), RowValues::Text("b".into())],
        ],
    );
    let all: Vec<User> = crud::find_all(&mut exec).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(
        exec.last(),
        &Call::Select("SELECT * FROM users".into(), vec![])
    );

    exec.push_rows(&["id"], vec![vec![RowValues::Int(2)]]);
    let qp = Statement::new()
        .select(&["id"])
        .from("users")
        .where_("name = %s", ["b"])
        .build();
    let some: Vec<User> = crud::find_where(&mut exec, &qp).await.unwrap();
    assert_eq!(some.len(), 1);
    assert_eq!(some[0].id, 2);
}

#[tokio::test]
async fn update_sets_everything_but_identity() {
    let mut exec = RecordingExecutor::default();
    let user = User {
        id: 3,
        ..new_user()
    };
    crud::update(&mut exec, &user).await.unwrap();
    assert_eq!(
        exec.last(),
        &Call::Dml(
            "UPDATE users SET name = $1, email = $2 WHERE id = $3".into(),
            vec![
                RowValues::Text("Ana".into()),
                RowValues::Text("ana@example.com".into()),
                RowValues::Int(3)
            ],
        )
    );
}

#[tokio::test]
async fn update_of_missing_row_reports_no_rows_affected() {
    let mut exec = RecordingExecutor::default();
    exec.push_dml(Ok(0));
    let err = crud::update(&mut exec, &new_user()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoRowsAffected);
}

#[tokio::test]
async fn update_needs_a_non_identity_column() {
    let mut exec = RecordingExecutor::default();
    let err = crud::update(&mut exec, &Counter { id: 1 }).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(exec.calls.is_empty());
}

#[tokio::test]
async fn delete_by_identity() {
    let mut exec = RecordingExecutor::default();
    let user = User {
        id: 12,
        ..User::default()
    };
    crud::delete(&mut exec, &user).await.unwrap();
    assert_eq!(
        exec.last(),
        &Call::Dml(
            "DELETE FROM users WHERE id = $1".into(),
            vec![RowValues::Int(12)]
        )
    );

    exec.push_dml(Ok(0));
    let err = crud::delete(&mut exec, &user).await.unwrap_err();
    assert!(matches!(
        err,
        SqlRecordError::NoRowsAffected { operation: "delete", .. }
    ));
}

#[tokio::test]
async fn delete_without_identity_fails_before_executing() {
    let mut exec = RecordingExecutor::default();
    let err = crud::delete(&mut exec, &AuditEntry::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentityMissing);
    assert!(exec.calls.is_empty());
}

#[tokio::test]
async fn works_through_a_trait_object() {
    let mut exec = RecordingExecutor::default();
    let dyn_exec: &mut dyn AsyncDatabaseExecutor = &mut exec;
    let mut user = User {
        id: 2,
        ..new_user()
    };
    crud::create(dyn_exec, &mut user).await.unwrap();
    assert_eq!(exec.calls.len(), 1);
}

/// Keyed by a natural `code` column the tags cannot mark.
#[derive(Debug, Default, Clone, PartialEq)]
struct Sku {
    code: String,
    qty: i64,
}

impl Record for Sku {
    fn descriptor() -> &'static RecordDescriptor {
        static DESCRIPTOR: RecordDescriptor = RecordDescriptor {
            table: "skus",
            fields: &[
                FieldDef {
                    ident: "code",
                    tag: None,
                    exported: true,
                    kind: ValueKind::Text,
                },
                FieldDef {
                    ident: "qty",
                    tag: None,
                    exported: true,
                    kind: ValueKind::Int,
                },
            ],
        };
        &DESCRIPTOR
    }

    fn read_field(&self, ident: &str) -> Option<RowValues> {
        match ident {
            "code" => Some(RowValues::Text(self.code.clone())),
            "qty" => Some(RowValues::Int(self.qty)),
            _ => None,
        }
    }

    fn write_field(&mut self, ident: &str, value: RowValues) -> Result<(), SqlRecordError> {
        match ident {
            "code" => self.code = FieldValue::from_value(value)?,
            "qty" => self.qty = FieldValue::from_value(value)?,
            _ => return Err(SqlRecordError::FieldNotFound(format!("skus.{ident}"))),
        }
        Ok(())
    }

    fn primary_key(&self) -> Result<(String, RowValues), SqlRecordError> {
        Ok(("code".into(), RowValues::Text(self.code.clone())))
    }

    fn primary_key_column() -> Result<String, SqlRecordError> {
        Ok("code".into())
    }
}

#[tokio::test]
async fn overridden_key_is_used_for_lookup_and_delete() {
    let mut exec = RecordingExecutor::default();
    exec.push_rows(
        &["code", "qty"],
        vec![vec![RowValues::Text("A1".into()), RowValues::Int(4)]],
    );

    let sku: Sku = crud::find_by_id(&mut exec, "A1").await.unwrap();
    assert_eq!(
        sku,
        Sku {
            code: "A1".into(),
            qty: 4
        }
    );
    assert_eq!(
        exec.last(),
        &Call::Select(
            "SELECT * FROM skus WHERE code = $1".into(),
            vec![RowValues::Text("A1".into())],
        )
    );

    crud::delete(&mut exec, &sku).await.unwrap();
    assert_eq!(
        exec.last(),
        &Call::Dml(
            "DELETE FROM skus WHERE code = $1".into(),
            vec![RowValues::Text("A1".into())],
        )
    );
}
