use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polyform::codec::{field, group3, list, Codec, JsonProvider, BOOL, LONG, STRING};
use polyform::{json, toml, yaml, ElementMap, JsonConfig, JsonElement};

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: i64,
    name: String,
    active: bool,
}

fn user_codec() -> impl Codec<JsonProvider, Value = User> + Send + Sync {
    group3(
        field("id", LONG, |u: &User| u.id),
        field("name", STRING, |u: &User| u.name.clone()),
        field("active", BOOL, |u: &User| u.active),
        |id, name, active| Some(User { id, name, active }),
    )
}

fn user_array_json(size: usize) -> String {
    let users: Vec<JsonElement> = (0..size)
        .map(|i| {
            let mut user = ElementMap::new();
            user.insert("id".to_string(), JsonElement::Integer(i as i64));
            user.insert("name".to_string(), JsonElement::from(format!("user-{i}")));
            user.insert("active".to_string(), JsonElement::Bool(i % 2 == 0));
            JsonElement::Object(user)
        })
        .collect();
    json::to_string(&JsonElement::Array(users))
}

const JSON_DOC: &str = r#"{
    "name": "orders-api",
    "replicas": 3,
    "debug": false,
    "timeout_seconds": 2.5,
    "endpoints": ["/orders", "/orders/{id}", "/health"],
    "limits": { "max_body_bytes": 1048576, "max_connections": 512 }
}"#;

const TOML_DOC: &str = r#"
name = "orders-api"
release = 2024-03-15

[server]
host = "0.0.0.0"
port = 8080
keepalive = 7.5

[[listener]]
protocol = "http"
port = 80

[[listener]]
protocol = "https"
port = 443
"#;

const YAML_DOC: &str = r#"
name: deploy
defaults: &defaults
  retries: 3
  timeout: 30
jobs:
  - name: build
    settings: *defaults
    steps: [checkout, compile]
  - name: test
    settings: *defaults
    steps: [unit, integration]
"#;

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("parse_json", |b| {
        b.iter(|| json::from_str(black_box(JSON_DOC)))
    });
    c.bench_function("parse_toml", |b| {
        b.iter(|| toml::from_str(black_box(TOML_DOC)))
    });
    c.bench_function("parse_yaml", |b| {
        b.iter(|| yaml::from_str(black_box(YAML_DOC)))
    });
}

fn benchmark_write(c: &mut Criterion) {
    let json_doc = json::from_str(JSON_DOC).unwrap();
    let toml_doc = toml::from_str(TOML_DOC).unwrap();
    let yaml_doc = yaml::from_str(YAML_DOC).unwrap();

    c.bench_function("write_json", |b| {
        b.iter(|| json::to_string(black_box(&json_doc)))
    });
    c.bench_function("write_json_compact", |b| {
        let config = JsonConfig::compact();
        b.iter(|| json::to_string_with(black_box(&json_doc), &config))
    });
    c.bench_function("write_toml", |b| {
        b.iter(|| toml::to_string(black_box(&toml_doc)))
    });
    c.bench_function("write_yaml", |b| {
        b.iter(|| yaml::to_string(black_box(&yaml_doc)))
    });
}

fn benchmark_parse_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_json_array");

    for size in [10, 50, 100, 500].iter() {
        let text = user_array_json(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| json::from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_codec(c: &mut Criterion) {
    let provider = JsonProvider;
    let codec = list(user_codec());
    let users: Vec<User> = (0..100)
        .map(|i| User {
            id: i,
            name: format!("user-{i}"),
            active: i % 2 == 0,
        })
        .collect();
    let element = codec.encode(&provider, &users).unwrap();

    c.bench_function("codec_encode_100", |b| {
        b.iter(|| codec.encode(&provider, black_box(&users)))
    });
    c.bench_function("codec_decode_100", |b| {
        b.iter(|| codec.decode(&provider, black_box(&element)))
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let doc = json::from_str(JSON_DOC).unwrap();

    c.bench_function("roundtrip_json", |b| {
        b.iter(|| {
            let text = json::to_string(black_box(&doc));
            json::from_str(black_box(&text)).unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_write,
    benchmark_parse_array,
    benchmark_codec,
    benchmark_roundtrip
);
criterion_main!(benches);
