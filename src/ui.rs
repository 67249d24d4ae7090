use serde_json::json;

/// Renders the page with the bootstrap palette embedded as JSON, the same
/// way the API would return it. The script reads it back out of the
/// `initial-data` element.
pub fn render_index(palette: &[String], palette_id: u64) -> String {
    let initial = json!({ "palette": palette, "id": palette_id });
    INDEX_HTML.replace("{{INITIAL_DATA}}", &initial.to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Palette Lab</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f6f4ef;
      --bg-2: #d9e4f5;
      --ink: #26262b;
      --accent: #5a67d8;
      --accent-2: #2f4858;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef1fa 60%, #f7f4ef 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(880px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    #palette-container {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    .color-block {
      flex: 1 1 120px;
      min-width: 110px;
      height: 130px;
      border-radius: 16px;
      display: flex;
      align-items: flex-end;
      justify-content: center;
      padding-bottom: 10px;
      border: 1px solid rgba(47, 72, 88, 0.1);
    }

    .color-code {
      background: rgba(255, 255, 255, 0.85);
      border-radius: 8px;
      padding: 2px 8px;
      font-size: 0.85rem;
      letter-spacing: 0.04em;
    }

    #proba-display {
      min-height: 1.3em;
      color: var(--accent-2);
      font-weight: 500;
    }

    .actions {
      display: flex;
      gap: 14px;
      flex-wrap: wrap;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 13px 22px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-like {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(90, 103, 216, 0.3);
    }

    .btn-dislike {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    section.card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 14px;
    }

    section.card h2 {
      margin: 0;
      font-size: 1.25rem;
    }

    .harmony-controls {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
      align-items: center;
    }

    input[type="text"],
    select {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
      padding: 10px 12px;
      font-size: 0.95rem;
      font-family: inherit;
    }

    input[type="color"] {
      width: 46px;
      height: 42px;
      border: none;
      border-radius: 10px;
      padding: 0;
      cursor: pointer;
      background: transparent;
    }

    #uploaded-section {
      display: none;
    }

    #uploaded-image {
      max-width: 320px;
      border-radius: 14px;
      border: 1px solid rgba(47, 72, 88, 0.12);
    }

    .top-palette {
      border-top: 1px solid rgba(47, 72, 88, 0.1);
      padding-top: 12px;
    }

    .top-palette p {
      margin: 6px 0 0;
      color: #6b645d;
    }

    .color-square {
      width: 64px;
      height: 56px;
      border-radius: 10px;
      margin-right: 6px;
      display: flex;
      align-items: flex-end;
      justify-content: center;
    }

    .color-square span {
      font-size: 0.65rem;
      background: rgba(255, 255, 255, 0.85);
      border-radius: 5px;
      padding: 1px 4px;
      margin-bottom: 4px;
    }
  </style>
</head>
<body>
  <script type="application/json" id="initial-data">{{INITIAL_DATA}}</script>

  <main class="app">
    <header>
      <h1>Palette Lab</h1>
      <p class="subtitle">Оценивайте палитры, и рекомендации будут подстраиваться под ваш вкус.</p>
    </header>

    <section>
      <div id="palette-container"></div>
      <p id="proba-display"></p>
      <div class="actions">
        <button type="button" class="btn-like" id="btn-like">Нравится 👍</button>
        <button type="button" class="btn-dislike" id="btn-dislike">Не нравится 👎</button>
      </div>
    </section>

    <section class="card">
      <h2>Палитра из изображения</h2>
      <form id="upload-form">
        <input type="file" id="image-input" name="image" accept="image/*" required />
        <button type="submit">Извлечь палитру</button>
        <button type="button" id="btn-reset">Сбросить</button>
      </form>
      <div id="uploaded-section">
        <img id="uploaded-image" alt="Загруженное изображение" />
      </div>
    </section>

    <section class="card">
      <h2>Гармония цветов</h2>
      <div class="harmony-controls">
        <input type="text" id="baseColorHex" value="#3498DB" size="9" />
        <input type="color" id="baseColorPicker" value="#3498db" />
        <select id="schemeSelect">
          <option value="complementary">Комплементарная</option>
          <option value="analogous">Аналоговая</option>
          <option value="triadic">Триада</option>
          <option value="monochromatic">Монохромная</option>
        </select>
        <button type="button" id="generateHarmonyBtn">Сгенерировать</button>
      </div>
    </section>

    <section class="card">
      <h2>Понравившиеся палитры</h2>
      <div id="liked-palettes"></div>
    </section>
  </main>

  <script>
    const initialData = JSON.parse(document.getElementById('initial-data').textContent);
    let currentPaletteId = initialData.id;

    const paletteContainer = document.getElementById('palette-container');
    const probaDisplay = document.getElementById('proba-display');
    const likedContainer = document.getElementById('liked-palettes');

    const HINT_TEXT = '💡 Чем больше вы оцените палитр, тем точнее мы сможем предсказывать ваши предпочтения!';

    const probaText = (proba) =>
      typeof proba === 'number'
        ? 'Вероятность лайка: ' + (proba * 100).toFixed(1) + '%'
        : HINT_TEXT;

    const displayPalette = (palette) => {
      paletteContainer.innerHTML = '';
      palette.forEach((color) => {
        const block = document.createElement('div');
        block.className = 'color-block';
        block.style.backgroundColor = color;

        const code = document.createElement('span');
        code.className = 'color-code';
        code.textContent = color;

        block.appendChild(code);
        paletteContainer.appendChild(block);
      });
    };

    const requestNewPalette = async () => {
      try {
        const res = await fetch('/generate');
        const data = await res.json();
        displayPalette(data.colors);
        currentPaletteId = data.palette_id;
        probaDisplay.textContent = probaText(data.proba);
        hideUploadedSection();
      } catch (err) {
        console.error('Ошибка генерации палитры:', err);
      }
    };

    const sendFeedback = async (feedbackType) => {
      try {
        const res = await fetch('/feedback', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ feedback: feedbackType, palette_id: currentPaletteId })
        });
        if (!res.ok) {
          throw new Error('ошибка сервера');
        }
        await res.json();
        requestNewPalette();
        loadLikedPalettes();
      } catch (err) {
        console.error('Ошибка отправки фидбека:', err);
      }
    };

    const loadLikedPalettes = async (showAll = false) => {
      try {
        const res = await fetch('/liked_palettes');
        const palettes = await res.json();
        likedContainer.innerHTML = '';

        if (palettes.length === 0) {
          const msg = document.createElement('p');
          msg.textContent = 'Вы еще не лайкнули ни одной палитры.';
          msg.style.fontStyle = 'italic';
          likedContainer.appendChild(msg);
          return;
        }

        const visible = showAll ? palettes : palettes.slice(0, 5);
        visible.forEach((palette) => {
          const entry = document.createElement('div');
          entry.className = 'top-palette';

          const bar = document.createElement('div');
          bar.style.display = 'flex';
          palette.colors
            .filter((color) => color && color.startsWith('#'))
            .forEach((color) => {
              const square = document.createElement('div');
              square.className = 'color-square';
              square.style.backgroundColor = color;

              const label = document.createElement('span');
              label.textContent = color;

              square.appendChild(label);
              bar.appendChild(square);
            });
          entry.appendChild(bar);

          const info = document.createElement('p');
          info.textContent = '👍 ' + palette.likes + ' | 👎 ' + palette.dislikes;
          entry.appendChild(info);

          if (palette.image) {
            const img = document.createElement('img');
            img.src = palette.image;
            img.style.maxWidth = '200px';
            img.style.marginTop = '8px';
            entry.appendChild(img);
          }

          likedContainer.appendChild(entry);
        });

        if (palettes.length > 5) {
          const toggle = document.createElement('button');
          toggle.textContent = showAll ? 'Свернуть' : 'Показать все';
          toggle.style.marginTop = '10px';
          toggle.onclick = () => loadLikedPalettes(!showAll);
          likedContainer.appendChild(toggle);
        }
      } catch (err) {
        console.error('Ошибка загрузки понравившихся палитр:', err);
      }
    };

    const showUploadedSection = (imageUrl) => {
      const section = document.getElementById('uploaded-section');
      const img = document.getElementById('uploaded-image');
      if (section && img) {
        img.src = imageUrl + '?t=' + Date.now();
        section.style.display = 'block';
        img.style.display = 'block';
      }
    };

    const hideUploadedSection = () => {
      const section = document.getElementById('uploaded-section');
      const img = document.getElementById('uploaded-image');
      if (section && img) {
        section.style.display = 'none';
        img.src = '';
      }
    };

    document.getElementById('btn-like').addEventListener('click', () => sendFeedback('like'));
    document.getElementById('btn-dislike').addEventListener('click', () => sendFeedback('dislike'));

    document.getElementById('upload-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const fileInput = document.getElementById('image-input');
      const formData = new FormData();
      formData.append('image', fileInput.files[0]);

      try {
        const res = await fetch('/upload', { method: 'POST', body: formData });
        const data = await res.json();
        if (!res.ok) {
          throw new Error(data.error || 'ошибка загрузки');
        }

        displayPalette(data.colors);
        currentPaletteId = data.palette_id;

        if (data.proba === 'need_feedback') {
          probaDisplay.textContent = HINT_TEXT;
        } else if (typeof data.proba === 'number') {
          probaDisplay.textContent = probaText(data.proba);
        } else {
          probaDisplay.textContent = '';
        }

        if (data.image) {
          showUploadedSection(data.image);
        }
        loadLikedPalettes();
      } catch (err) {
        console.error('Ошибка загрузки изображения:', err);
      }
    });

    document.getElementById('btn-reset').addEventListener('click', () => {
      const fileInput = document.getElementById('image-input');
      if (fileInput) {
        fileInput.value = '';
      }
      hideUploadedSection();
      probaDisplay.textContent = '';
      requestNewPalette();
    });

    const baseColorHexInput = document.getElementById('baseColorHex');
    const baseColorPicker = document.getElementById('baseColorPicker');

    if (baseColorHexInput && baseColorPicker) {
      baseColorPicker.addEventListener('input', () => {
        baseColorHexInput.value = baseColorPicker.value.toUpperCase();
      });
      baseColorHexInput.addEventListener('input', () => {
        let value = baseColorHexInput.value;
        if (!value.startsWith('#')) {
          value = '#' + value;
        }
        if (/^#[0-9A-Fa-f]{6}$/.test(value)) {
          baseColorPicker.value = value;
        }
      });
    }

    document.getElementById('generateHarmonyBtn').addEventListener('click', async () => {
      const baseColor = baseColorHexInput.value;
      const scheme = document.getElementById('schemeSelect').value;

      try {
        const res = await fetch('/generate_harmony', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ base_color: baseColor, scheme: scheme })
        });
        const data = await res.json();
        if (data.colors) {
          displayPalette(data.colors);
          currentPaletteId = data.palette_id;
          probaDisplay.textContent = probaText(data.proba);
        } else {
          alert('Ошибка генерации палитры: ' + (data.error || 'неизвестная ошибка'));
        }
      } catch (err) {
        console.error('Ошибка запроса к /generate_harmony:', err);
      }
    });

    displayPalette(initialData.palette);
    requestNewPalette();
    loadLikedPalettes();
  </script>
</body>
</html>
"##;
