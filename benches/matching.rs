use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use segrouter::loader::routes_from_yaml_str;
use segrouter::{Params, Request, RouteCollection, Router};
use std::hint::black_box;

fn example_routes() -> &'static str {
    r#"
root:
  path: /
animals:
  path: /zoo/animals
  accepts: [GET, POST]
animal:
  path: /zoo/animals/:id
  requires:
    id: '\d+'
  children:
    toy:
      path: /toys/:toy_id
habitat_section:
  path: /zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id
item_batch:
  path: /inventory/:warehouse_id/feeds/:feed_id/items/:item_id/batches/:batch_id
  accepts: [POST]
complex_many_params:
  path: /complex/:a/:b/:c/:d/:e/:f/:g/:h/:i
search:
  path: /search/:keyword[/:page[/:per_page]]
  defaults:
    page: 1
health:
  path: /zoo/health
  accepts: [HEAD, OPTIONS, TRACE]
"#
}

fn load() -> RouteCollection {
    routes_from_yaml_str(example_routes()).expect("failed to load routes")
}

fn bench_route_throughput(c: &mut Criterion) {
    let mut router = load();
    let requests = [
        Request::new(Method::GET, "/zoo/animals/123"),
        Request::new(Method::GET, "/zoo/animals/123/toys/456"),
        Request::new(Method::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
        Request::new(Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
        Request::new(Method::GET, "/complex/1/2/3/4/5/6/7/8/9"),
        Request::new(Method::GET, "/search/rust/2"),
        Request::new(Method::GET, "/nowhere/at/all"),
    ];
    c.bench_function("route_match", |b| {
        b.iter(|| {
            for request in requests.iter() {
                let res = router.match_request(request);
                black_box(&res);
            }
        })
    });
}

fn bench_assemble(c: &mut Criterion) {
    let router = load();
    let params: Params = [("keyword", "rust"), ("page", "3"), ("id", "42")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    c.bench_function("route_assemble", |b| {
        b.iter(|| {
            black_box(router.assemble("search", &params).ok());
            black_box(router.assemble("animal/toy", &params).ok());
        })
    });
}

criterion_group!(benches, bench_route_throughput, bench_assemble);
criterion_main!(benches);
