mod common;

use common::{get, params, request};
use http::Method;
use segrouter::{Params, Request, Route, RouteDefinition, RoutingError};
use std::sync::Arc;

fn literal(definition: RouteDefinition) -> Arc<Route> {
    Arc::new(Route::literal(definition).unwrap())
}

fn pattern(definition: RouteDefinition) -> Arc<Route> {
    Arc::new(Route::pattern(definition).unwrap())
}

#[test]
fn test_literal_match() {
    let route = literal(RouteDefinition::new("home", "/"));
    let m = route.match_request(&get("/")).unwrap();
    assert_eq!(m.name(), "home");
    assert!(route.match_request(&get("/other")).is_none());
}

#[test]
fn test_literal_accepts() {
    let route = literal(RouteDefinition::new("home", "/").with_accepts(["POST"]));
    assert!(route.match_request(&get("/")).is_none());
    assert!(route.match_request(&request(Method::POST, "/")).is_some());
}

#[test]
fn test_subdomain_requirement() {
    let single = literal(RouteDefinition::new("home", "/").with_requirement("subdomain", "test"));
    let list = literal(RouteDefinition::new("home", "/").with_requirement("subdomain", ["test"]));
    assert!(single.match_request(&get("/")).is_none());
    assert!(list.match_request(&get("/")).is_none());

    let clients = literal(
        RouteDefinition::new("home", "/").with_requirement("subdomain", "clients2"),
    );
    assert!(clients
        .match_request(&get("/").with_host("clients2.test.com"))
        .is_some());
    assert!(list.match_request(&get("/").with_subdomain("test")).is_some());
}

#[test]
fn test_format_requirement() {
    let route = literal(RouteDefinition::new("home", "/").with_requirement("format", "xml"));
    let m = route
        .match_request(&get("/").with_accept("text/xml"))
        .unwrap();
    assert_eq!(m.get_param("format"), Some("xml"));
    assert!(route.match_request(&get("/").with_accept("text/json")).is_none());
    assert!(route.match_request(&get("/")).is_none());
}

#[test]
fn test_format_requirement_picks_first_acceptable_candidate() {
    let route = literal(
        RouteDefinition::new("home", "/").with_requirement("format", ["json", "xml"]),
    );
    let m = route
        .match_request(&get("/").with_accept("text/xml, application/json;q=0.9"))
        .unwrap();
    assert_eq!(m.get_param("format"), Some("json"));
}

#[test]
fn test_query_requirement() {
    let route = literal(RouteDefinition::new("home", "/").with_requirement("test", "^blah"));
    let m = route.match_request(&get("/?test=blah")).unwrap();
    assert_eq!(m.get_param("test"), Some("blah"));

    let strict = literal(RouteDefinition::new("home", "/").with_requirement("test", "blah"));
    assert!(strict.match_request(&get("/?test=test")).is_none());
}

#[test]
fn test_query_requirement_only_checked_for_get() {
    let route = literal(RouteDefinition::new("home", "/").with_requirement("test", "blah"));
    assert!(route
        .match_request(&request(Method::POST, "/?test=nope"))
        .is_some());
}

#[test]
fn test_query_params_without_requirement_are_ignored() {
    let route = literal(RouteDefinition::new("home", "/").with_requirement("test", "blah"));
    let m = route.match_request(&get("/?other=1")).unwrap();
    assert_eq!(m.get_param("other"), None);
}

#[test]
fn test_literal_assemble() {
    let route = literal(RouteDefinition::new("home", "/"));
    assert_eq!(route.assemble(None, &Params::new()).unwrap(), "/");
    assert_eq!(
        route.assemble(Some("http://127.0.0.1"), &Params::new()).unwrap(),
        "http://127.0.0.1/"
    );
}

#[test]
fn test_pattern_display() {
    let route = pattern(RouteDefinition::new("home", "/"));
    assert_eq!(route.to_string(), "<Pattern name:home path:/ match:^/$>");
}

#[test]
fn test_segment_match() {
    let route = pattern(RouteDefinition::new("home", "/:test"));
    let m = route.match_request(&get("/blah")).unwrap();
    assert_eq!(m.get_param("test"), Some("blah"));
}

#[test]
fn test_segment_no_match() {
    let route = pattern(RouteDefinition::new("home", "/:test").with_accepts(["GET"]));
    assert!(route.match_request(&get("/")).is_none());
    assert!(route.match_request(&request(Method::POST, "/test")).is_none());
}

#[test]
fn test_optional_match() {
    let optional = pattern(RouteDefinition::new("home", "/about[/:company]"));
    let nested = pattern(RouteDefinition::new("home", "/about[/:company[/:test]]"));
    let required = pattern(RouteDefinition::new("home", "/about[/:company/:test]"));

    assert!(optional.match_request(&get("/about/test")).is_some());
    assert_eq!(optional.segments().map(<[_]>::len), Some(2));
    assert!(nested.match_request(&get("/about/test")).is_some());
    assert!(required.match_request(&get("/about/test/blah")).is_some());
    assert!(required.match_request(&get("/about/test")).is_none());
}

#[test]
fn test_optional_defaults_fill_params() {
    let route = pattern(RouteDefinition::new("home", "/about[/:company]").with_default("company", "test"));
    let m = route.match_request(&get("/about")).unwrap();
    assert_eq!(m.get_param("company"), Some("test"));

    let m = route.match_request(&get("/about/acme")).unwrap();
    assert_eq!(m.get_param("company"), Some("acme"));
}

#[test]
fn test_bracket_mismatch_is_rejected() {
    let err = Route::pattern(RouteDefinition::new("mismatch", "/search:keyword]")).unwrap_err();
    assert!(matches!(err, RoutingError::MalformedTemplate { .. }));
}

#[test]
fn test_constrained_segment() {
    let route = pattern(RouteDefinition::new("post", "/posts/:id").with_requirement("id", r"\d+"));
    assert!(route.match_request(&get("/posts/12")).is_some());
    assert!(route.match_request(&get("/posts/abc")).is_none());
}

#[test]
fn test_one_of_segment() {
    let route = pattern(
        RouteDefinition::new("lang", "/:lang/home").with_requirement("lang", ["en", "fr"]),
    );
    assert!(route.match_request(&get("/fr/home")).is_some());
    assert!(route.match_request(&get("/de/home")).is_none());
}

#[test]
fn test_raw_regex_match() {
    let route = pattern(RouteDefinition::named("year").with_regex(r"/archive/(?P<year>\d{4})"));
    let m = route.match_request(&get("/archive/2024")).unwrap();
    assert_eq!(m.get_param("year"), Some("2024"));
    assert!(route.match_request(&get("/archive/24")).is_none());
}

#[test]
fn test_segment_assemble() {
    let route = pattern(RouteDefinition::new("home", "/:test"));
    let optional = pattern(RouteDefinition::new("home", "/about[/:test]"));
    let nested = pattern(RouteDefinition::new("home", "/about[/:company[/:test]]"));
    let requires = pattern(
        RouteDefinition::new("home", "/about/:company").with_requirement("company", r"\w+"),
    );

    assert_eq!(
        requires.assemble(None, &params(&[("company", "test")])).unwrap(),
        "/about/test"
    );
    assert_eq!(
        requires.assemble(None, &Params::new()).unwrap_err(),
        RoutingError::MissingParameter {
            name: "company".to_string()
        }
    );
    assert_eq!(route.assemble(None, &params(&[("test", "blah")])).unwrap(), "/blah");
    assert_eq!(
        route
            .assemble(Some("http://127.0.0.1"), &params(&[("test", "blah")]))
            .unwrap(),
        "http://127.0.0.1/blah"
    );
    assert_eq!(optional.assemble(None, &params(&[("test", "blah")])).unwrap(), "/about/blah");
    assert_eq!(optional.assemble(None, &Params::new()).unwrap(), "/about");
    assert_eq!(
        nested.assemble(None, &params(&[("company", "testing")])).unwrap(),
        "/about/testing"
    );
    assert_eq!(
        nested
            .assemble(None, &params(&[("company", "testing"), ("test", "blah")]))
            .unwrap(),
        "/about/testing/blah"
    );
    assert!(route.assemble(None, &Params::new()).is_err());
}

#[test]
fn test_params_for_without_arc() {
    let route = Route::pattern(RouteDefinition::new("home", "/:a/:b")).unwrap();
    let request = Request::new(Method::GET, "/x/y");
    let params = route
        .params_for(&request, &segrouter::FormatTable::default())
        .unwrap();
    assert_eq!(params.len(), 2);
}
