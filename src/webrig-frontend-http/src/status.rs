// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn index_html() -> String {
    INDEX_HTML_TEMPLATE
        .replace("{pkg}", PKG_NAME)
        .replace("{ver}", PKG_VERSION)
}

const INDEX_HTML_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{pkg} v{ver}</title>
  <style>
    body { font-family: sans-serif; margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center; background: #0d1117; color: #e5e7eb; }
    .card { border: 1px solid #1f2a35; border-radius: 12px; padding: 1.25rem 1.75rem; width: min(680px, 90vw); background: #161b22; }
    .label { color: #9aa4b5; font-size: 0.9rem; margin-bottom: 6px; display: block; }
    .value { font-size: 1.4rem; margin-bottom: 0.5rem; font-family: ui-monospace, Menlo, Consolas, monospace; }
    .status { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; }
    input, select { width: 100%; padding: 0.45rem 0.5rem; font-size: 1rem; border: 1px solid #2d3748; border-radius: 6px; background: #0f1720; color: #e5e7eb; box-sizing: border-box; }
    button { padding: 0.5rem 0.9rem; border-radius: 6px; border: 1px solid #394455; background: #1f2937; color: #e5e7eb; cursor: pointer; }
    .inline { display: flex; gap: 0.5rem; align-items: center; }
    .header { display: flex; justify-content: space-between; align-items: baseline; margin-bottom: 0.75rem; }
    .title { font-size: 1.4rem; font-weight: 700; }
    #link.connected { color: #4ade80; }
    #link.reconnecting, #link.connecting { color: #facc15; }
    #link.disconnected { color: #f87171; }
    #error { color: #f87171; min-height: 1.2rem; margin-top: 0.75rem; }
  </style>
</head>
<body>
<div class="card">
  <div class="header">
    <span class="title">{pkg}</span>
    <span id="link" class="disconnected">disconnected</span>
  </div>
  <div class="status">
    <div><span class="label">Frequency (Hz)</span>
      <div class="inline"><input id="freq" type="number" min="1"><button data-send="set_freq">Set</button></div></div>
    <div><span class="label">Mode</span>
      <select id="mode">
        <option>LSB</option><option>USB</option><option>CW</option><option>CWR</option>
        <option>AM</option><option>FM</option><option>RTTY</option><option>PKTUSB</option>
      </select></div>
    <div><span class="label">Filter width (Hz)</span>
      <div class="inline"><input id="filter_width" type="number" min="0"><button data-send="set_filter_width">Set</button></div></div>
    <div><span class="label">S-meter (dB)</span><div class="value" id="smeter">-</div></div>
    <div><span class="label">RF gain (%)</span><input id="rf_gain" type="range" min="0" max="100"></div>
    <div><span class="label">Power (%)</span><input id="power" type="range" min="0" max="100"></div>
    <div><span class="label">AGC</span>
      <select id="agc"><option>OFF</option><option>SLOW</option><option>MED</option><option>FAST</option></select></div>
    <div><span class="label">RIT (Hz)</span>
      <div class="inline"><button data-rit="-10">-10</button><span class="value" id="rit">0</span><button data-rit="10">+10</button></div></div>
    <div><span class="label">Break-in</span><input id="break_in" type="checkbox"></div>
    <div><span class="label">Spot</span><input id="spot" type="checkbox"></div>
  </div>
  <div id="error"></div>
</div>
<script>
(() => {
  const $ = (id) => document.getElementById(id);
  let ws = null;

  function token() {
    let t = sessionStorage.getItem("webrig-token");
    if (!t) {
      const user = prompt("Username");
      const pass = prompt("Password");
      t = `${user}:${pass}`;
      sessionStorage.setItem("webrig-token", t);
    }
    return t;
  }

  function send(cmd, extra) {
    if (ws && ws.readyState === WebSocket.OPEN) {
      ws.send(JSON.stringify(Object.assign({ cmd }, extra)));
    }
  }

  function render(s) {
    const focused = document.activeElement;
    for (const key of ["freq", "filter_width", "rf_gain", "power"]) {
      if ($(key) !== focused) $(key).value = s[key];
    }
    if ($("mode") !== focused) $("mode").value = s.mode;
    if ($("agc") !== focused) $("agc").value = s.agc;
    $("smeter").textContent = s.smeter;
    $("rit").textContent = s.rit;
    $("break_in").checked = s.break_in;
    $("spot").checked = s.spot;
  }

  function connect() {
    const proto = location.protocol === "https:" ? "wss:" : "ws:";
    ws = new WebSocket(`${proto}//${location.host}/ws?token=${encodeURIComponent(token())}`);
    ws.onmessage = (ev) => {
      const msg = JSON.parse(ev.data);
      if (msg.type === "state") {
        render(msg);
      } else if (msg.type === "link") {
        $("link").textContent = msg.state;
        $("link").className = msg.state;
      } else if (msg.type === "error") {
        $("error").textContent = `${msg.kind}: ${msg.message}`;
      } else if (msg.type === "ack") {
        $("error").textContent = msg.success ? "" : `radio declined ${msg.cmd}`;
      }
    };
    ws.onclose = (ev) => {
      $("link").textContent = "offline";
      $("link").className = "disconnected";
      if (ev.code === 1006 && !ws.everOpened) sessionStorage.removeItem("webrig-token");
      setTimeout(connect, 2000);
    };
    ws.onopen = () => { ws.everOpened = true; };
  }

  document.querySelector('[data-send="set_freq"]').onclick = () =>
    send("set_freq", { value: parseInt($("freq").value, 10) });
  document.querySelector('[data-send="set_filter_width"]').onclick = () =>
    send("set_filter_width", { value: parseInt($("filter_width").value, 10), mode: $("mode").value });
  $("mode").onchange = () => send("set_mode", { value: $("mode").value });
  $("agc").onchange = () => send("set_agc", { value: $("agc").value });
  $("rf_gain").onchange = () => send("set_rf_gain", { value: parseInt($("rf_gain").value, 10) });
  $("power").onchange = () => send("set_power", { value: parseInt($("power").value, 10) });
  $("break_in").onchange = () => send("set_break_in", { value: $("break_in").checked });
  $("spot").onchange = () => send("set_spot", { value: $("spot").checked });
  for (const b of document.querySelectorAll("[data-rit]")) {
    b.onclick = () => send("adjust_rit", { value: parseInt(b.dataset.rit, 10) });
  }

  connect();
})();
</script>
</body>
</html>
"##;
