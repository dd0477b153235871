use sql_record::prelude::*;

#[test]
fn select_with_conditions() {
    let qp = Statement::new()
        .select(&["a", "b"])
        .from("t")
        .where_("a = %s", [1])
        .and("b = %s", ["x"])
        .build();
    assert_eq!(qp.query, "SELECT a, b FROM t WHERE a = $1 AND b = $2");
    assert_eq!(
        qp.params,
        vec![RowValues::Int(1), RowValues::Text("x".into())]
    );
}

#[test]
fn insert_returning() {
    let qp = Statement::new()
        .insert("t", &["n", "e"], ["J", "j@x"])
        .returning(&["id"])
        .build();
    assert_eq!(qp.query, "INSERT INTO t (n, e) VALUES ($1, $2) RETURNING id");
    assert_eq!(
        qp.params,
        vec![RowValues::Text("J".into()), RowValues::Text("j@x".into())]
    );
}

#[test]
fn update_then_where_keeps_numbering() {
    let qp = Statement::new()
        .update("t", &["n"], ["J"])
        .where_("id = %s", [7])
        .build();
    assert_eq!(qp.query, "UPDATE t SET n = $1 WHERE id = $2");
    assert_eq!(
        qp.params,
        vec![RowValues::Text("J".into()), RowValues::Int(7)]
    );
}

#[test]
fn reuse_after_reset() {
    let mut stmt = Statement::new();
    stmt.select(&[]).from("a").where_("x = %s", [1]);
    let first = stmt.build();
    assert_eq!(first.query, "SELECT * FROM a WHERE x = $1");

    stmt.reset();
    let second = stmt
        .select(&["y"])
        .from("b")
        .where_("y > %s", [2.5])
        .or("y IS NULL", Vec::<RowValues>::new())
        .order_by(&["y"])
        .limit(5)
        .build();
    assert_eq!(
        second.query,
        "SELECT y FROM b WHERE y > $1 OR y IS NULL ORDER BY y LIMIT 5"
    );
    assert_eq!(second.params, vec![RowValues::Float(2.5)]);
}

#[test]
fn mixed_value_types_in_one_clause() {
    let qp = Statement::new()
        .delete("sessions")
        .where_(
            "user_id = %s AND expired = %s AND note LIKE '%%old%%'",
            [RowValues::Int(4), RowValues::Bool(true)],
        )
        .build();
    assert_eq!(
        qp.query,
        "DELETE FROM sessions WHERE user_id = $1 AND expired = $2 AND note LIKE '%old%'"
    );
}
