//! Parsing and executing query strings over a small collection.

use serde_json::{json, Value};
use sieve_query::{parse, Record};

fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

fn run(query: &str, input: &[Record]) -> Value {
    json!(parse(query).unwrap().execute(input))
}

fn five() -> Vec<Record> {
    records((0..5).map(|i| json!({"i": i})).collect())
}

#[test]
fn empty_query_returns_collection_unchanged() {
    let input = five();
    assert_eq!(parse("").unwrap().execute(&input), input);
}

#[test]
fn count_two_offset_one() {
    assert_eq!(run("limit=2,1", &five()), json!([{"i": 1}, {"i": 2}]));
}

#[test]
fn offset_past_end_is_empty() {
    assert_eq!(run("limit=2,9", &five()), json!([]));
}

#[test]
fn count_zero_with_offset_runs_to_end() {
    assert_eq!(run("limit=0,3", &five()), json!([{"i": 3}, {"i": 4}]));
}

#[test]
fn membership_operators() {
    let input = records(vec![
        json!({"n": "a", "tags": ["red", "blue"]}),
        json!({"n": "b", "tags": ["red"]}),
        json!({"n": "c", "tags": [1, 2, 3]}),
        json!({"n": "d", "tags": "red"}),
    ]);

    assert_eq!(
        run("filter=tags=any:blue|red&fields=n", &input),
        json!([{"n": "a"}, {"n": "b"}])
    );
    assert_eq!(
        run("filter=tags=cts:RED|blue&fields=n", &input),
        json!([{"n": "a"}])
    );
    assert_eq!(
        run("filter=tags=cts:3|1&fields=n", &input),
        json!([{"n": "c"}])
    );
}

#[test]
fn string_ordering_operators_are_natural() {
    let input = records(vec![
        json!({"v": "file2"}),
        json!({"v": "file10"}),
        json!({"v": "File1"}),
    ]);

    assert_eq!(
        run("filter=v=gt:file2&fields=v", &input),
        json!([{"v": "file10"}])
    );
    assert_eq!(
        run("filter=v=lte:FILE2&sort=v", &input),
        json!([{"v": "File1"}, {"v": "file2"}])
    );
}

#[test]
fn numeric_filters_read_leading_number() {
    let input = records(vec![json!({"x": 5}), json!({"x": 12}), json!({"x": -1})]);

    assert_eq!(run("filter=x=gte:5px&sort=x", &input), json!([{"x": 5}, {"x": 12}]));
    // No numeric prefix reads as 0.
    assert_eq!(run("filter=x=lt:abc", &input), json!([{"x": -1}]));
}

#[test]
fn neq_and_lke() {
    let input = records(vec![
        json!({"name": "Middlemarch"}),
        json!({"name": "Emma"}),
        json!({"name": "Dune"}),
    ]);

    assert_eq!(
        run("filter=name=neq:emma&sort=-name", &input),
        json!([{"name": "Middlemarch"}, {"name": "Dune"}])
    );
    assert_eq!(run("filter=name=lke:un", &input), json!([{"name": "Dune"}]));
}

#[test]
fn percent_encoded_values() {
    let input = records(vec![json!({"start": "12:30"}), json!({"start": "09:00"})]);
    assert_eq!(
        run("filter=start%3Deq%3A12%3A30", &input),
        json!([{"start": "12:30"}])
    );
}
