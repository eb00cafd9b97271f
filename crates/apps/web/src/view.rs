//! SVG tree for the globe: background disc plus one path per country.

use formats::{CountryCollection, CountryData};
use foundation::math::OrthographicProjection;
use layers::svg::{SVG_NS, Viewport, country_inline_style};
use layers::{CountryLayer, CountryPath, GlobeStyle};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

#[derive(Debug)]
pub struct GlobeDom {
    pub svg: Element,
    pub globe: Element,
    map: Element,
    countries: Option<Element>,
    /// Same order as the features of the drawn collection.
    paths: Vec<Element>,
}

impl GlobeDom {
    pub fn mount(
        document: &Document,
        container: &Element,
        viewport: Viewport,
        projection: &OrthographicProjection,
        style: &GlobeStyle,
    ) -> Result<Self, JsValue> {
        let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
        // Touch drags rotate the globe instead of scrolling the page.
        svg.set_attribute("style", "touch-action: none")?;
        let globe = document.create_element_ns(Some(SVG_NS), "circle")?;
        globe.set_attribute("fill", style.fill)?;
        globe.set_attribute("stroke", style.stroke)?;
        globe.set_attribute("stroke-width", &style.stroke_width.to_string())?;
        svg.append_child(&globe)?;

        let map = document.create_element_ns(Some(SVG_NS), "g")?;
        svg.append_child(&map)?;
        container.append_child(&svg)?;

        let dom = Self {
            svg,
            globe,
            map,
            countries: None,
            paths: Vec::new(),
        };
        dom.resize(viewport, projection)?;
        Ok(dom)
    }

    pub fn resize(
        &self,
        viewport: Viewport,
        projection: &OrthographicProjection,
    ) -> Result<(), JsValue> {
        let (w, h) = viewport.svg_size();
        self.svg.set_attribute("width", &w.to_string())?;
        self.svg.set_attribute("height", &h.to_string())?;
        let c = projection.translate();
        self.globe.set_attribute("cx", &c.x.to_string())?;
        self.globe.set_attribute("cy", &c.y.to_string())?;
        self.set_globe_radius(projection.scale())
    }

    pub fn set_globe_radius(&self, radius: f64) -> Result<(), JsValue> {
        self.globe.set_attribute("r", &radius.to_string())
    }

    /// Create the country paths, replacing any drawn earlier. Returns the
    /// new elements paired with their data so callers can attach listeners.
    pub fn draw_countries<'a>(
        &mut self,
        document: &Document,
        layer: &CountryLayer,
        paths: &'a [CountryPath],
    ) -> Result<Vec<(Element, &'a CountryPath)>, JsValue> {
        if let Some(old) = self.countries.take() {
            old.remove();
        }
        self.paths.clear();

        let group = document.create_element_ns(Some(SVG_NS), "g")?;
        group.set_attribute("class", "countries")?;
        let style = country_inline_style(&layer.style);

        let mut out = Vec::with_capacity(paths.len());
        for path in paths {
            let el = document.create_element_ns(Some(SVG_NS), "path")?;
            el.set_attribute("class", &path.class())?;
            el.set_attribute("d", &path.d)?;
            el.set_attribute("fill", path.fill)?;
            el.set_attribute("style", &style)?;
            group.append_child(&el)?;
            self.paths.push(el.clone());
            out.push((el, path));
        }

        self.map.append_child(&group)?;
        self.countries = Some(group);
        Ok(out)
    }

    /// Recompute every outline after the projection changed.
    pub fn redraw_paths(
        &self,
        collection: &CountryCollection,
        projection: &OrthographicProjection,
    ) -> Result<(), JsValue> {
        for (el, feature) in self.paths.iter().zip(&collection.features) {
            el.set_attribute("d", &feature.geometry.path(projection))?;
        }
        Ok(())
    }

    /// Recompute every fill after the score data changed.
    pub fn repaint_fills(
        &self,
        layer: &CountryLayer,
        collection: &CountryCollection,
        data: Option<&CountryData>,
    ) -> Result<(), JsValue> {
        for (el, feature) in self.paths.iter().zip(&collection.features) {
            el.set_attribute("fill", layer.fill(data, feature))?;
        }
        Ok(())
    }

    pub fn unmount(&self) {
        self.svg.remove();
    }
}
