//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use dns_zone_client::{
    HttpConfig, HttpMethod, RecordType, Result, Transport, TransportRequest, TransportResponse,
    ZoneClient, ZoneCredentials,
};

pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const CREATED_ON: &str = "2024-01-01T05:20:00.12345Z";
pub const MODIFIED_ON: &str = "2024-02-11T08:00:00Z";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name(zone: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{zone}", &uuid.to_string()[..8])
}

/// 模拟服务端的异常行为
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fault {
    #[default]
    None,
    /// 每个请求都返回该状态码
    Status(u16),
    /// 写操作返回 `{"success": true}`，没有 result
    SuccessWithoutResult,
    /// 写操作返回 `{"success": true, "result": true}`
    ScalarResult,
    /// POST 返回记录但不保存
    DropCreated,
    /// 写操作返回正常响应但不改变区域
    IgnoreWrites,
    /// 列表读取时篡改每条记录的 TTL
    TamperOnRead,
    /// 列表中每条记录出现两次
    DuplicateListing,
    /// 列表中附带一条缺少 ttl 的记录
    MalformedListing,
    /// 翻页期间第一条记录被修改：第 2 页起再次返回它，TTL 改为 600
    EditedBetweenPages,
}

#[derive(Debug, Default)]
struct ZoneState {
    records: BTreeMap<String, Value>,
    next_id: u64,
    fault: Fault,
    page_size: Option<usize>,
    requests: Vec<(HttpMethod, String)>,
}

/// 内存中的 Cloudflare 区域，按真实 API 的信封格式响应
#[derive(Debug, Default)]
pub struct FakeZone {
    state: Mutex<ZoneState>,
}

impl FakeZone {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> ZoneClient<Arc<Self>> {
        ZoneClient::new(ZONE_ID, Arc::clone(self))
    }

    pub fn set_fault(&self, fault: Fault) {
        self.state.lock().unwrap().fault = fault;
    }

    /// 列表分页大小（默认一页返回全部）
    pub fn set_page_size(&self, size: usize) {
        self.state.lock().unwrap().page_size = Some(size);
    }

    /// 直接写入一条记录，绕过 API
    pub fn seed(&self, record: Value) {
        let id = record["id"].as_str().unwrap().to_string();
        self.state.lock().unwrap().records.insert(id, record);
    }

    pub fn stored(&self, id: &str) -> Option<Value> {
        self.state.lock().unwrap().records.get(id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    /// 已收到的请求（方法和路径）
    pub fn requests(&self) -> Vec<(HttpMethod, String)> {
        self.state.lock().unwrap().requests.clone()
    }

    fn handle(state: &mut ZoneState, request: &TransportRequest) -> (u16, Value) {
        let (path, query) = request
            .path
            .split_once('?')
            .unwrap_or((request.path.as_str(), ""));
        let prefix = format!("/zones/{ZONE_ID}/dns_records");
        let Some(rest) = path.strip_prefix(&prefix) else {
            return failure(404, 7003, "Could not route to the requested path");
        };
        let record_id = rest.strip_prefix('/');
        let body: Option<Map<String, Value>> = request
            .body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok());

        match (request.method, record_id, body) {
            (HttpMethod::Get, None, _) => list(state, query),
            (HttpMethod::Post, None, Some(body)) => create(state, body),
            (HttpMethod::Put, Some(id), Some(body)) => update(state, id, body),
            (HttpMethod::Delete, Some(id), _) => delete(state, id),
            _ => failure(400, 1004, "DNS Validation Error"),
        }
    }
}

#[async_trait]
impl Transport for FakeZone {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push((request.method, request.path.clone()));

        let fault = state.fault.clone();
        let (status, body) = match fault {
            Fault::Status(status) => failure(status, 10000, "Authentication error"),
            Fault::SuccessWithoutResult if request.method != HttpMethod::Get => {
                (200, json!({"success": true, "errors": [], "messages": []}))
            }
            Fault::ScalarResult if request.method != HttpMethod::Get => success(json!(true)),
            _ => Self::handle(&mut state, &request),
        };

        Ok(TransportResponse {
            status,
            body: body.to_string(),
        })
    }
}

fn success(result: Value) -> (u16, Value) {
    (
        200,
        json!({"success": true, "errors": [], "messages": [], "result": result}),
    )
}

fn failure(status: u16, code: u32, message: &str) -> (u16, Value) {
    (
        status,
        json!({
            "success": false,
            "errors": [{"code": code, "message": message}],
            "messages": [],
            "result": null
        }),
    )
}

fn page_param(query: &str) -> usize {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
}

fn list(state: &ZoneState, query: &str) -> (u16, Value) {
    let mut all: Vec<Value> = state.records.values().cloned().collect();
    match state.fault {
        Fault::TamperOnRead => {
            for record in &mut all {
                let ttl = record["ttl"].as_u64().unwrap_or(300);
                record["ttl"] = json!(ttl + 1);
            }
        }
        Fault::DuplicateListing => {
            all = all.into_iter().flat_map(|r| [r.clone(), r]).collect();
        }
        Fault::MalformedListing => {
            let mut broken = record_json("broken", "broken.example.com", "A", "192.0.2.9", 300);
            broken.as_object_mut().unwrap().remove("ttl");
            all.push(broken);
        }
        _ => {}
    }

    let page_size = state.page_size.unwrap_or(all.len().max(1));
    let total_pages = all.len().div_ceil(page_size).max(1);
    let page = page_param(query);
    let edited = all.first().cloned().map(|mut first| {
        first["ttl"] = json!(600);
        first
    });
    let mut items: Vec<Value> = all
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    if state.fault == Fault::EditedBetweenPages
        && page > 1
        && let Some(edited) = edited
    {
        items.push(edited);
    }

    let (status, mut body) = success(Value::Array(items.clone()));
    body["result_info"] = json!({
        "page": page,
        "per_page": page_size,
        "count": items.len(),
        "total_count": state.records.len(),
        "total_pages": total_pages
    });
    (status, body)
}

fn create(state: &mut ZoneState, body: Map<String, Value>) -> (u16, Value) {
    state.next_id += 1;
    let id = format!("{:032x}", state.next_id);
    let mut record = record_json(
        &id,
        body.get("name").and_then(Value::as_str).unwrap_or_default(),
        body.get("type").and_then(Value::as_str).unwrap_or_default(),
        body.get("content").and_then(Value::as_str).unwrap_or_default(),
        body.get("ttl").and_then(Value::as_u64).unwrap_or(1),
    );
    record["proxied"] = body.get("proxied").cloned().unwrap_or(json!(false));
    record["comment"] = body.get("comment").cloned().unwrap_or(Value::Null);

    if state.fault != Fault::DropCreated && state.fault != Fault::IgnoreWrites {
        state.records.insert(id, record.clone());
    }
    success(record)
}

fn update(state: &mut ZoneState, id: &str, body: Map<String, Value>) -> (u16, Value) {
    let Some(existing) = state.records.get(id) else {
        return failure(404, 81044, "Record does not exist.");
    };
    let mut record = existing.clone();
    for key in ["name", "type", "content", "proxied", "ttl"] {
        if let Some(value) = body.get(key) {
            record[key] = value.clone();
        }
    }
    // PUT 为整体替换：未提供的 comment 被清空
    record["comment"] = body.get("comment").cloned().unwrap_or(Value::Null);
    record["modified_on"] = json!("2024-03-01T00:00:00Z");

    if state.fault != Fault::IgnoreWrites {
        state.records.insert(id.to_string(), record.clone());
    }
    success(record)
}

fn delete(state: &mut ZoneState, id: &str) -> (u16, Value) {
    if !state.records.contains_key(id) {
        return failure(404, 81044, "Record does not exist.");
    }
    if state.fault != Fault::IgnoreWrites {
        state.records.remove(id);
    }
    success(json!({"id": id}))
}

/// 以 Cloudflare 的格式构造一条记录
pub fn record_json(id: &str, name: &str, record_type: &str, content: &str, ttl: u64) -> Value {
    let proxiable = RecordType::parse(record_type).is_ok_and(RecordType::is_proxiable);
    json!({
        "id": id,
        "zone_id": ZONE_ID,
        "zone_name": "example.com",
        "name": name,
        "type": record_type,
        "content": content,
        "proxiable": proxiable,
        "proxied": false,
        "ttl": ttl,
        "locked": false,
        "comment": null,
        "tags": [],
        "created_on": CREATED_ON,
        "modified_on": MODIFIED_ON,
        "meta": {"auto_added": false, "source": "primary"}
    })
}

/// 真实 Cloudflare 区域的测试上下文
pub struct LiveZone {
    pub client: ZoneClient,
    pub zone_name: String,
}

impl LiveZone {
    pub fn from_env() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let zone_id = env::var("CLOUDFLARE_ZONE_ID").ok()?;
        let zone_name = env::var("TEST_DOMAIN").ok()?;

        let credentials = ZoneCredentials::new(zone_id, api_token);
        let client = ZoneClient::from_credentials(credentials, &HttpConfig::default()).ok()?;
        Some(Self { client, zone_name })
    }
}
