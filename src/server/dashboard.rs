//! ダッシュボード画面のHTML生成

use chrono::{DateTime, TimeZone};
use maize_dashboard_common::farm::{AlertLevel, ComponentState, ContextBundle, CropStatus, Range};
use std::fmt::Display;
use std::fmt::Write as _;

const ACCENT: &str = "#00ff9d";
const AMBER: &str = "#ffae00";
const RED: &str = "#ff0000";

/// 資源残量の色（70超: 緑, 30超: 黄, それ以下: 赤）
fn level_color(level: u8) -> &'static str {
    match level {
        71.. => ACCENT,
        31..=70 => AMBER,
        _ => RED,
    }
}

/// 総合健康度の色（80超: 緑, 60超: 黄, それ以下: 赤）
fn health_color(value: u8) -> &'static str {
    match value {
        81.. => ACCENT,
        61..=80 => AMBER,
        _ => RED,
    }
}

fn alert_color(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Critical => RED,
        AlertLevel::Warning => AMBER,
        AlertLevel::Info => ACCENT,
    }
}

fn component_color(state: ComponentState) -> &'static str {
    match state {
        ComponentState::Operational => ACCENT,
        ComponentState::MaintenanceRequired => AMBER,
        ComponentState::Critical => RED,
    }
}

fn crop_color(status: CropStatus) -> &'static str {
    match status {
        CropStatus::Optimal => ACCENT,
        CropStatus::Low => AMBER,
        CropStatus::Critical => RED,
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn range_label(range: &Range) -> String {
    format!("{}-{}", range.min, range.max)
}

/// ダッシュボード全体を描画
pub fn render_dashboard<Tz>(context: &ContextBundle, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<header><h1>HYDROPONIC FARM CONTROL CENTER</h1><span class="updated">Last updated: {}</span></header>"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    body.push_str(r#"<main><section class="column">"#);
    render_status(&mut body, context);
    render_inventory(&mut body, context);
    body.push_str(r#"</section><section class="column">"#);
    render_health(&mut body, context);
    render_resources(&mut body, context);
    render_upload(&mut body);
    body.push_str(r#"</section><section class="column">"#);
    render_chat(&mut body);
    body.push_str("</section></main>");

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Maize Farm Dashboard</title><style>{}</style></head>\
         <body>{}<script>{}</script></body></html>\n",
        STYLE, body, SCRIPT
    )
}

fn render_status(out: &mut String, context: &ContextBundle) {
    let status = &context.system_status;

    out.push_str(r#"<div class="card"><h2>MAIZE CULTIVATION STATUS</h2><div class="grid">"#);
    for component in &status.components {
        let _ = write!(
            out,
            r#"<div class="tile"><h4>{}</h4><div class="big" style="color:{}">{}%</div><div class="small">Efficiency &middot; {}</div></div>"#,
            escape(&component.name),
            component_color(component.status),
            component.efficiency,
            component.status.label()
        );
    }
    out.push_str("</div></div>");

    out.push_str(r#"<div class="card"><h2>ACTIVE ALERTS</h2>"#);
    for alert in &status.alerts {
        let pulse = if alert.level == AlertLevel::Critical { " pulse" } else { "" };
        let _ = write!(
            out,
            r#"<div class="alert"><span class="dot{}" style="color:{}">&#9679;</span>{}</div>"#,
            pulse,
            alert_color(alert.level),
            escape(&alert.message)
        );
    }
    out.push_str("</div>");
}

fn render_inventory(out: &mut String, context: &ContextBundle) {
    let inventory = &context.inventory;

    out.push_str(
        r#"<div class="card"><h2>INVENTORY</h2><table><tr><th>Crop</th><th>Quantity</th><th>Status</th></tr>"#,
    );
    for crop in &inventory.crops {
        let _ = write!(
            out,
            r#"<tr><td>{}</td><td>{} {}</td><td style="color:{}">{}</td></tr>"#,
            escape(&crop.name),
            crop.quantity,
            escape(&crop.unit),
            crop_color(crop.status),
            crop.status.label()
        );
    }
    out.push_str("</table></div>");
}

fn render_resources(out: &mut String, context: &ContextBundle) {
    out.push_str(r#"<div class="card"><h2>RESOURCES</h2><div class="grid">"#);
    for resource in &context.inventory.resources {
        let _ = write!(
            out,
            r#"<div class="tile"><div class="gauge"><div class="fill" style="height:{level}%;background:{color}"></div><span>{level}{unit}</span></div><div class="small">{name}</div></div>"#,
            level = resource.level,
            color = level_color(resource.level),
            unit = escape(&resource.unit),
            name = escape(&resource.name)
        );
    }
    out.push_str("</div></div>");
}

fn render_health(out: &mut String, context: &ContextBundle) {
    let health = &context.plant_health;
    let ranges = &health.optimal_ranges;

    out.push_str(r#"<div class="card"><h2>MAIZE HEALTH</h2>"#);
    for metric in &health.current_metrics {
        let _ = write!(
            out,
            r#"<div class="tile"><h4>{} &middot; Overall Health</h4><div class="big" style="color:{}">{}%</div></div><div class="grid">"#,
            escape(&metric.plant),
            health_color(metric.health),
            metric.health
        );
        for (label, value, range) in [
            ("pH", metric.ph, &ranges.ph),
            ("Humidity", metric.humidity, &ranges.humidity),
            ("Temp", metric.temperature, &ranges.temperature),
        ] {
            let color = if range.contains(value) { ACCENT } else { AMBER };
            let _ = write!(
                out,
                r#"<div class="pill"><div class="small">{}</div><div style="color:{}">{}</div><div class="small">Optimal: {}</div></div>"#,
                label,
                color,
                value,
                range_label(range)
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn render_upload(out: &mut String) {
    out.push_str(
        r#"<div class="card"><h2>MAIZE IMAGE ANALYSIS</h2><label class="upload">Select Image<input type="file" id="upload-image" accept="image/*" hidden></label><div id="output-image-upload"></div></div>"#,
    );
}

fn render_chat(out: &mut String) {
    out.push_str(
        r#"<div class="card chat"><h2>MAIZE ASSISTANT</h2><div id="chat-history"></div><form id="chat-form"><input id="chat-input" autocomplete="off" placeholder="Ask about health, water, nutrients..."><button type="submit">Send</button></form></div>"#,
    );
}

const STYLE: &str = r#"
body{margin:0;background:#1a1a1a;color:#fff;font-family:Orbitron,sans-serif}
header{display:flex;justify-content:space-between;align-items:center;padding:16px 24px;border-bottom:2px solid #00ff9d}
h1{color:#00ff9d;margin:0;font-size:1.6rem}h2{color:#00ff9d;font-size:1rem;margin:0 0 12px}h4{margin:0 0 8px;font-size:.9rem}
main{display:grid;grid-template-columns:1fr 1fr 1fr;gap:16px;padding:16px}
.card{background:#2d2d2d;border-radius:8px;padding:15px;margin-bottom:16px}
.grid{display:flex;gap:10px;flex-wrap:wrap}.tile,.pill{flex:1;text-align:center;min-width:90px}
.big{font-size:1.5rem;font-weight:bold}.small{font-size:.8rem}.updated{font-size:.8rem}
.alert{margin-bottom:10px}.dot{margin-right:10px}.pulse{animation:pulse 2s infinite}
@keyframes pulse{50%{opacity:.3}}
table{width:100%;border-collapse:collapse;margin-bottom:12px}th{color:#00ff9d;border-bottom:2px solid #00ff9d;text-align:left}
.gauge{position:relative;height:80px;background:#1a1a1a;border-radius:6px;overflow:hidden}
.fill{position:absolute;bottom:0;width:100%;opacity:.6}.gauge span{position:relative;line-height:80px}
.upload{display:block;border:2px dashed #00ff9d;border-radius:8px;padding:20px;text-align:center;color:#00ff9d;cursor:pointer}
#output-image-upload img{max-width:400px;max-height:400px;margin:20px 0;border-radius:10px;border:2px solid #00ff9d}
#chat-history{height:50vh;overflow-y:auto;margin-bottom:10px}#chat-history div{margin-bottom:10px}
#chat-form{display:flex;gap:8px}#chat-input{flex:1;background:#1a1a1a;color:#fff;border:1px solid #00ff9d;padding:6px}
button{background:#00ff9d;border:none;padding:6px 12px;cursor:pointer}
"#;

const SCRIPT: &str = r#"
const STATUS_COLORS={Healthy:'#00ff9d',Spotted:'#ffae00',Blighted:'#ff0000'};
function el(tag,text,color){const e=document.createElement(tag);e.textContent=text;if(color)e.style.color=color;return e;}
function row(label,value,color){const d=document.createElement('div');d.append(el('strong',label,color||'#00ff9d'),el('span',value));return d;}
document.getElementById('upload-image').addEventListener('change',ev=>{
  const file=ev.target.files[0];if(!file)return;
  const reader=new FileReader();
  reader.onload=async()=>{
    const out=document.getElementById('output-image-upload');out.replaceChildren();
    const img=document.createElement('img');img.src=reader.result;out.append(img);
    try{
      const res=await fetch('/api/analyze',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({contents:reader.result})});
      const data=await res.json();
      if(data.success){
        const s=row('Health Status: ',data.health_status);s.lastChild.style.color=STATUS_COLORS[data.health_status]||'#00ff9d';
        out.append(s,row('Confidence: ',(data.confidence*100).toFixed(1)+'%'),row('Analysis: ',data.description),row('Detected Features: ',data.tags.join(', ')));
      }else{out.append(row('Error: ',data.error,'#ff0000'));}
    }catch(e){out.append(row('Error: ',String(e),'#ff0000'));}
  };
  reader.readAsDataURL(file);
});
document.getElementById('chat-form').addEventListener('submit',async ev=>{
  ev.preventDefault();
  const input=document.getElementById('chat-input');const message=input.value;if(!message)return;
  const history=document.getElementById('chat-history');
  history.append(row('You: ',message));input.value='';
  const res=await fetch('/api/chat',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({message})});
  const data=await res.json();
  history.append(row('Farm Assistant: ',data.response||data.error));
  history.scrollTop=history.scrollHeight;
});
"#;
