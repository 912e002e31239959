//! Drive the C ABI the way a host would: build through FFI, run the GET with
//! ureq, then decode through FFI against the live mock server.

use std::ffi::{c_void, CStr, CString};
use std::net::SocketAddr;
use std::os::raw::c_char;
use std::sync::Mutex;

use epidata_ffi::types::{FfiErrorCode, FfiHttpResponse};
use epidata_ffi::{
    epidata_build_request, epidata_client_free, epidata_client_new, epidata_free_build_result,
    epidata_parse_response,
};
use serde_json::Value;

type Seen = Mutex<Vec<(i64, String, Option<Value>)>>;

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

extern "C" fn record(result: i64, message: *const c_char, epidata_json: *const c_char, user_data: *mut c_void) {
    let seen = unsafe { &*(user_data as *const Seen) };
    let message = unsafe { CStr::from_ptr(message) }.to_str().unwrap().to_string();
    let epidata = if epidata_json.is_null() {
        None
    } else {
        let raw = unsafe { CStr::from_ptr(epidata_json) }.to_str().unwrap();
        Some(serde_json::from_str(raw).unwrap())
    };
    seen.lock().unwrap().push((result, message, epidata));
}

/// Build the query through FFI, GET it, decode it through FFI.
fn call(addr: SocketAddr, query: &str) -> Vec<(i64, String, Option<Value>)> {
    let base = CString::new(format!("http://{addr}/api.php")).unwrap();
    let client = epidata_client_new(base.as_ptr());
    let query = CString::new(query).unwrap();

    let built = epidata_build_request(client, query.as_ptr());
    let url = {
        let built = unsafe { &*built };
        assert_eq!(built.error_code, FfiErrorCode::Ok);
        let request = unsafe { &*built.request };
        unsafe { CStr::from_ptr(request.url) }.to_str().unwrap().to_string()
    };
    epidata_free_build_result(built);

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let mut resp = agent.get(&url).call().unwrap();
    let status = resp.status().as_u16();
    let body = CString::new(resp.body_mut().read_to_string().unwrap()).unwrap();

    let seen: Seen = Mutex::new(Vec::new());
    let response = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    let code = epidata_parse_response(&response, Some(record), &seen as *const Seen as *mut c_void);
    assert_eq!(code, FfiErrorCode::Ok);

    epidata_client_free(client);
    seen.into_inner().unwrap()
}

#[test]
fn fluview_echo_round_trip() {
    let addr = start_server();
    let seen = call(
        addr,
        r#"{"endpoint":"fluview","regions":["nat","hhs1"],"epiweeks":{"from":201440,"to":201501},"lag":2}"#,
    );

    assert_eq!(seen.len(), 1);
    let (result, message, epidata) = &seen[0];
    assert_eq!(*result, 1);
    assert_eq!(message, "success");
    let epidata = epidata.as_ref().unwrap();
    assert_eq!(epidata[0]["source"], "fluview");
    assert_eq!(epidata[0]["regions"], "nat,hhs1");
    assert_eq!(epidata[0]["epiweeks"], "201440-201501");
    assert_eq!(epidata[0]["lag"], "2");
}

#[test]
fn server_failure_code_passes_through() {
    let addr = start_server();
    let seen = call(addr, r#"{"endpoint":"nidss_dengue","locations":[],"epiweeks":201501}"#);
    assert_eq!(seen, vec![(-2, "no results".to_string(), None)]);
}

#[test]
fn validation_error_never_reaches_server() {
    let base = CString::new("http://127.0.0.1:9/api.php").unwrap();
    let client = epidata_client_new(base.as_ptr());
    let query = CString::new(r#"{"endpoint":"delphi","system":"ec"}"#).unwrap();

    let built = epidata_build_request(client, query.as_ptr());
    {
        let built = unsafe { &*built };
        assert_eq!(built.error_code, FfiErrorCode::Validation);
        assert!(built.request.is_null());
        let msg = unsafe { CStr::from_ptr(built.error_message) }.to_str().unwrap();
        assert_eq!(msg, "`system` and `epiweek` are both required");
    }
    epidata_free_build_result(built);
    epidata_client_free(client);
}
