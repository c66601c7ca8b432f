//! Composer form page

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Request Composer</title>
</head>
<body>
  <form id="composer">
    <label>Port <input id="port" name="port" value="8080"></label>
    <label>Route <input id="route" name="route" placeholder="/api/items"></label>
    <label>Method
      <select id="method" name="method">
        <option>GET</option>
        <option>POST</option>
        <option>PUT</option>
        <option>DELETE</option>
      </select>
    </label>
    <label>Body <textarea id="body" name="body" rows="6"></textarea></label>
    <button type="submit">Send</button>
  </form>
  <pre id="response"></pre>
  <script>
    fetch("/api/settings").then(r => r.json()).then(settings => {
      document.getElementById("port").value = settings.default_port;
      if (settings.base_url_override) {
        document.getElementById("port").disabled = true;
      }
    });

    document.getElementById("composer").addEventListener("submit", async (event) => {
      event.preventDefault();
      const payload = {
        method: document.getElementById("method").value,
        route: document.getElementById("route").value,
        body: document.getElementById("body").value,
        port: document.getElementById("port").value,
      };
      try {
        const res = await fetch("/api/requests", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify(payload),
        });
        const result = await res.json();
        if (result.submitted) {
          document.getElementById("response").textContent = result.response;
        }
      } catch (err) {
        document.getElementById("response").textContent = "Received an error: " + err;
      }
    });
  </script>
</body>
</html>
"#;
