use crate::model::TopologyView;
use crate::render::svg::{RenderOptions, escape_xml, render_svg};

/// Render a self-contained HTML report: the SVG diagram plus a searchable
/// device/link sidebar driven by the view embedded as JSON.
///
/// Important: we avoid `format!()` because the HTML contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_html_report(view: &TopologyView, opts: &RenderOptions) -> anyhow::Result<String> {
    // "</" would end the <script> element early.
    let json = serde_json::to_string(view)?.replace("</", "<\\/");
    let svg = render_svg(view, opts)?;

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .container { display: flex; height: calc(100vh - 58px); }
  .sidebar { width: 360px; border-right: 1px solid #ddd; padding: 12px; overflow: auto; }
  .main { flex: 1; padding: 12px; overflow: auto; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }

  .device { cursor: pointer; user-select: none; padding: 2px 4px; border-radius: 4px; }
  .device:hover { background: #f3f3f3; }
  .device.selected { background: #e9f2ff; border: 1px solid #cfe3ff; }
  .muted { color: #777; font-size: 12px; }
  .warn { color: #b35c00; }

  table { border-collapse: collapse; width: 100%; margin-top: 8px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: left; font-size: 14px; }
  th { position: sticky; top: 0; background: white; border-bottom: 1px solid #ddd; }
  .num { text-align: right; font-variant-numeric: tabular-nums; }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>

<div class="container">
  <div class="sidebar">
    <input id="search" placeholder="Search device..." style="width: 100%; box-sizing: border-box; padding: 6px 8px; border: 1px solid #ddd; border-radius: 6px; margin-bottom: 8px;">
    <div id="devices"></div>
  </div>

  <div class="main">
    <div id="diagram">
__SVG__
    </div>
    <h2 id="title">All links</h2>
    <table>
      <thead>
        <tr>
          <th>device</th>
          <th>neighbor</th>
          <th>subnet</th>
          <th class="num">bandwidth (Mbps)</th>
          <th class="num">seen from</th>
        </tr>
      </thead>
      <tbody id="linksBody"></tbody>
    </table>
  </div>
</div>

<script>
// Embedded topology view (JSON object literal)
const DATA = __DATA__;

const state = {
  selected: null,
  search: ""
};

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function renderSummary() {
  const t = DATA.totals;
  const el = document.getElementById("summary");
  el.innerHTML = `
    <span class="pill">devices: <b>${t.devices}</b></span>
    <span class="pill">links: <b>${t.links}</b></span>
    <span class="pill">routers: <b>${t.routers}</b></span>
    <span class="pill">switches: <b>${t.switches}</b></span>
    <span class="pill">other: <b>${t.other}</b></span>
    <span class="pill">one-sided links: <b>${t.one_sided_links}</b></span>
  `;
}

function renderDevices() {
  const root = document.getElementById("devices");
  root.innerHTML = "";
  const s = state.search.toLowerCase();

  for (const node of DATA.nodes) {
    if (s && !node.name.toLowerCase().includes(s)) continue;

    const row = document.createElement("div");
    row.className = "device" + (state.selected === node.name ? " selected" : "");
    row.onclick = () => selectDevice(state.selected === node.name ? null : node.name);
    row.innerHTML = `${escapeHtml(node.name)} <span class="muted">(${node.category}, ${node.degree} links)</span>`;
    root.appendChild(row);
  }
}

function renderLinks() {
  const body = document.getElementById("linksBody");
  body.innerHTML = "";

  for (const e of DATA.edges) {
    let [a, b] = [e.a, e.b];
    if (state.selected) {
      if (a !== state.selected && b !== state.selected) continue;
      if (b === state.selected) [a, b] = [b, a];
    }
    const tr = document.createElement("tr");
    tr.innerHTML = `
      <td>${escapeHtml(a)}</td>
      <td>${escapeHtml(b)}</td>
      <td><code>${escapeHtml(e.subnet || "")}</code></td>
      <td class="num">${e.bandwidth_mbps}</td>
      <td class="num${e.one_sided ? " warn" : ""}">${e.one_sided ? "one side" : escapeHtml(e.observed_by.join(", "))}</td>
    `;
    body.appendChild(tr);
  }
}

function selectDevice(name) {
  state.selected = name;
  document.getElementById("title").textContent = name ? `Links of ${name}` : "All links";
  renderDevices();
  renderLinks();
}

document.getElementById("search").addEventListener("input", (e) => {
  state.search = e.target.value || "";
  renderDevices();
});

renderSummary();
selectDevice(null);
</script>
</body>
</html>
"#;

    let title = escape_xml(&view.title);
    Ok(fill_template(
        TEMPLATE,
        &[("__TITLE__", &title), ("__SVG__", &svg), ("__DATA__", &json)],
    ))
}

/// Substitute placeholders in one left-to-right pass; inserted values are never
/// scanned again.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(key).map(|at| (at, *key, *value)))
            .min_by_key(|(at, _, _)| *at);
        let Some((at, key, value)) = next else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + key.len()..];
    }
}
